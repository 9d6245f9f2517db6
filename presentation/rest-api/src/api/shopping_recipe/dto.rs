use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use poem_openapi::Object;

use business::domain::shopping_entry::model::ShoppingEntry;
use business::domain::shopping_entry::summary::{AggregatedIngredient, ShoppingSummary};

#[derive(Debug, Clone, Object)]
pub struct AddRecipeRequest {
    /// Recipe document id (non-blank, no "/")
    pub recipe_id: String,
    /// Recipe title shown in the shopping list
    pub title: String,
    /// Ingredient strings copied from the recipe
    #[oai(default)]
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Object)]
pub struct SetCheckedRequest {
    /// Ingredient string exactly as listed in the entry
    pub ingredient: String,
    pub checked: bool,
}

#[derive(Debug, Clone, Object)]
pub struct RemoveIngredientRequest {
    pub ingredient: String,
}

#[derive(Debug, Clone, Object)]
pub struct ShoppingEntryResponse {
    pub recipe_id: String,
    pub title: String,
    /// Ingredients in recipe order
    pub ingredients: Vec<String>,
    /// Checked state per listed ingredient
    pub check_map: BTreeMap<String, bool>,
    /// Number of listed ingredients not yet checked
    pub pending_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ShoppingEntry> for ShoppingEntryResponse {
    fn from(entry: ShoppingEntry) -> Self {
        Self {
            recipe_id: entry.recipe_id.to_string(),
            check_map: entry.check_map(),
            pending_count: entry.checklist.pending() as u32,
            ingredients: entry.ingredients().to_vec(),
            title: entry.title,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// One server-sent event: the full shopping scope after a change.
#[derive(Debug, Clone, Object)]
pub struct ShoppingSnapshotEvent {
    pub entries: Vec<ShoppingEntryResponse>,
}

impl From<Vec<ShoppingEntry>> for ShoppingSnapshotEvent {
    fn from(entries: Vec<ShoppingEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct AggregatedIngredientResponse {
    pub name: String,
    /// Recipes listing this ingredient
    pub recipe_ids: Vec<String>,
    /// True when every listing recipe has it checked
    pub checked: bool,
}

impl From<AggregatedIngredient> for AggregatedIngredientResponse {
    fn from(ingredient: AggregatedIngredient) -> Self {
        Self {
            name: ingredient.name,
            recipe_ids: ingredient
                .recipe_ids
                .iter()
                .map(ToString::to_string)
                .collect(),
            checked: ingredient.checked,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ShoppingSummaryResponse {
    pub recipe_count: u32,
    pub pending_count: u32,
    pub ingredients: Vec<AggregatedIngredientResponse>,
}

impl From<ShoppingSummary> for ShoppingSummaryResponse {
    fn from(summary: ShoppingSummary) -> Self {
        Self {
            recipe_count: summary.recipe_count as u32,
            pending_count: summary.pending_count() as u32,
            ingredients: summary.ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ClearShoppingResponse {
    /// Number of recipes removed
    pub count: u64,
}
