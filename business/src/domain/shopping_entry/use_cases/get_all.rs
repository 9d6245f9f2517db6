use async_trait::async_trait;

use crate::domain::shared::session::Session;
use crate::domain::shopping_entry::errors::ShoppingEntryError;
use crate::domain::shopping_entry::model::ShoppingEntry;

pub struct GetShoppingEntriesParams {
    pub session: Session,
}

#[async_trait]
pub trait GetShoppingEntriesUseCase: Send + Sync {
    async fn execute(
        &self,
        params: GetShoppingEntriesParams,
    ) -> Result<Vec<ShoppingEntry>, ShoppingEntryError>;
}
