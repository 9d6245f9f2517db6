use async_trait::async_trait;

use crate::domain::shared::session::Session;
use crate::domain::shopping_entry::errors::ShoppingEntryError;
use crate::domain::shopping_entry::subscription::Subscription;

pub struct SubscribeShoppingParams {
    pub session: Session,
}

#[async_trait]
pub trait SubscribeShoppingUseCase: Send + Sync {
    async fn execute(&self, params: SubscribeShoppingParams)
    -> Result<Subscription, ShoppingEntryError>;
}
