use chrono::{DateTime, Utc};
use sqlx::FromRow;

use business::domain::shopping_entry::checklist::Checklist;
use business::domain::shopping_entry::model::ShoppingEntry;
use business::domain::shopping_entry::value_objects::RecipeId;

/// Row of `shopping_recipes`. `checked` holds the ticked ingredient names.
#[derive(Debug, FromRow)]
pub struct ShoppingEntryEntity {
    pub recipe_id: String,
    pub title: String,
    pub ingredients: Vec<String>,
    pub checked: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShoppingEntryEntity {
    pub fn into_domain(self) -> ShoppingEntry {
        ShoppingEntry::from_repository(
            RecipeId::from_repository(self.recipe_id),
            self.title,
            Checklist::from_parts(self.ingredients, self.checked),
            self.created_at,
            self.updated_at,
        )
    }
}
