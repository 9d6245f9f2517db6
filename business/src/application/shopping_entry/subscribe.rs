use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::shopping_entry::errors::ShoppingEntryError;
use crate::domain::shopping_entry::repository::ShoppingEntryRepository;
use crate::domain::shopping_entry::subscription::Subscription;
use crate::domain::shopping_entry::use_cases::subscribe::{
    SubscribeShoppingParams, SubscribeShoppingUseCase,
};

pub struct SubscribeShoppingUseCaseImpl {
    pub repository: Arc<dyn ShoppingEntryRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SubscribeShoppingUseCase for SubscribeShoppingUseCaseImpl {
    async fn execute(
        &self,
        params: SubscribeShoppingParams,
    ) -> Result<Subscription, ShoppingEntryError> {
        let user_id = params
            .session
            .user_id()
            .ok_or(ShoppingEntryError::Unauthenticated)?;

        self.logger
            .info(&format!("Opening shopping subscription for user {}", user_id));

        let snapshots = self.repository.watch(user_id).await?;
        Ok(Subscription::new(snapshots))
    }
}
