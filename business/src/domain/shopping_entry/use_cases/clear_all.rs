use async_trait::async_trait;

use crate::domain::shared::session::Session;
use crate::domain::shopping_entry::errors::ShoppingEntryError;

pub struct ClearShoppingParams {
    pub session: Session,
}

#[async_trait]
pub trait ClearShoppingUseCase: Send + Sync {
    async fn execute(&self, params: ClearShoppingParams) -> Result<u64, ShoppingEntryError>;
}
