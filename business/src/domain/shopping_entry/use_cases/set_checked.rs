use async_trait::async_trait;

use crate::domain::shared::session::Session;
use crate::domain::shopping_entry::errors::ShoppingEntryError;

pub struct SetIngredientCheckedParams {
    pub session: Session,
    pub recipe_id: String,
    pub ingredient: String,
    pub checked: bool,
}

#[async_trait]
pub trait SetIngredientCheckedUseCase: Send + Sync {
    async fn execute(&self, params: SetIngredientCheckedParams) -> Result<(), ShoppingEntryError>;
}
