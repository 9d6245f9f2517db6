use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::shopping_entry::errors::ShoppingEntryError;
use crate::domain::shopping_entry::model::ShoppingEntry;
use crate::domain::shopping_entry::repository::ShoppingEntryRepository;
use crate::domain::shopping_entry::use_cases::get_all::{
    GetShoppingEntriesParams, GetShoppingEntriesUseCase,
};

pub struct GetShoppingEntriesUseCaseImpl {
    pub repository: Arc<dyn ShoppingEntryRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetShoppingEntriesUseCase for GetShoppingEntriesUseCaseImpl {
    async fn execute(
        &self,
        params: GetShoppingEntriesParams,
    ) -> Result<Vec<ShoppingEntry>, ShoppingEntryError> {
        let user_id = params
            .session
            .user_id()
            .ok_or(ShoppingEntryError::Unauthenticated)?;

        self.logger.debug("Getting all shopping entries");
        let entries = self.repository.get_all(user_id).await?;
        self.logger
            .debug(&format!("Retrieved {} shopping entries", entries.len()));
        Ok(entries)
    }
}
