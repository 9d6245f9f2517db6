use async_trait::async_trait;

use crate::domain::shared::session::Session;
use crate::domain::shopping_entry::errors::ShoppingEntryError;

pub struct RemoveIngredientParams {
    pub session: Session,
    pub recipe_id: String,
    pub ingredient: String,
}

#[async_trait]
pub trait RemoveIngredientUseCase: Send + Sync {
    async fn execute(&self, params: RemoveIngredientParams) -> Result<(), ShoppingEntryError>;
}
