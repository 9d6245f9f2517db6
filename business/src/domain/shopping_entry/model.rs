use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::shared::value_objects::UserId;

use super::checklist::Checklist;
use super::value_objects::RecipeId;

/// Recipe data copied into the shopping scope when it is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub recipe_id: RecipeId,
    pub title: String,
    pub ingredients: Vec<String>,
}

/// One recipe currently in a user's shopping scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingEntry {
    pub recipe_id: RecipeId,
    pub title: String,
    pub checklist: Checklist,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShoppingEntry {
    pub fn new(draft: RecipeDraft) -> Self {
        let now = Utc::now();
        Self {
            recipe_id: draft.recipe_id,
            title: draft.title,
            checklist: Checklist::new(draft.ingredients),
            created_at: now,
            updated_at: now,
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        recipe_id: RecipeId,
        title: String,
        checklist: Checklist,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            recipe_id,
            title,
            checklist,
            created_at,
            updated_at,
        }
    }

    /// Applies a re-add of the same recipe: title and ingredients follow the
    /// draft, creation time stays, checked state survives for ingredients
    /// still listed.
    pub fn merge(&mut self, draft: RecipeDraft) {
        self.title = draft.title;
        self.checklist.reconcile(draft.ingredients);
        self.updated_at = Utc::now();
    }

    pub fn ingredients(&self) -> &[String] {
        self.checklist.ingredients()
    }

    pub fn check_map(&self) -> BTreeMap<String, bool> {
        self.checklist.check_map()
    }

    /// Logical storage address of an entry.
    pub fn document_path(user_id: &UserId, recipe_id: &RecipeId) -> String {
        format!("users/{}/shoppingRecipes/{}", user_id, recipe_id)
    }
}

/// Snapshot ordering shared by every store: oldest first, id as tie-break.
pub fn sort_snapshot(entries: &mut [ShoppingEntry]) {
    entries.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.recipe_id.cmp(&b.recipe_id))
    });
}
