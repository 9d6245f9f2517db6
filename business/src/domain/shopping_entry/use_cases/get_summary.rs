use async_trait::async_trait;

use crate::domain::shared::session::Session;
use crate::domain::shopping_entry::errors::ShoppingEntryError;
use crate::domain::shopping_entry::summary::ShoppingSummary;

pub struct GetShoppingSummaryParams {
    pub session: Session,
}

#[async_trait]
pub trait GetShoppingSummaryUseCase: Send + Sync {
    async fn execute(
        &self,
        params: GetShoppingSummaryParams,
    ) -> Result<ShoppingSummary, ShoppingEntryError>;
}
