use async_trait::async_trait;

use crate::domain::shared::session::Session;
use crate::domain::shopping_entry::errors::ShoppingEntryError;

pub struct RemoveRecipeParams {
    pub session: Session,
    pub recipe_id: String,
}

#[async_trait]
pub trait RemoveRecipeFromShoppingUseCase: Send + Sync {
    async fn execute(&self, params: RemoveRecipeParams) -> Result<(), ShoppingEntryError>;
}
