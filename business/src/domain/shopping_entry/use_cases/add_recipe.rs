use async_trait::async_trait;

use crate::domain::shared::session::Session;
use crate::domain::shopping_entry::errors::ShoppingEntryError;
use crate::domain::shopping_entry::model::ShoppingEntry;

pub struct AddRecipeParams {
    pub session: Session,
    pub recipe_id: String,
    pub title: String,
    pub ingredients: Vec<String>,
}

#[async_trait]
pub trait AddRecipeToShoppingUseCase: Send + Sync {
    async fn execute(&self, params: AddRecipeParams) -> Result<ShoppingEntry, ShoppingEntryError>;
}
