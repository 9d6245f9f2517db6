use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::shopping_entry::errors::ShoppingEntryError;
use crate::domain::shopping_entry::repository::ShoppingEntryRepository;
use crate::domain::shopping_entry::use_cases::clear_all::{
    ClearShoppingParams, ClearShoppingUseCase,
};

pub struct ClearShoppingUseCaseImpl {
    pub repository: Arc<dyn ShoppingEntryRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ClearShoppingUseCase for ClearShoppingUseCaseImpl {
    async fn execute(&self, params: ClearShoppingParams) -> Result<u64, ShoppingEntryError> {
        let user_id = params
            .session
            .user_id()
            .ok_or(ShoppingEntryError::Unauthenticated)?;

        self.logger
            .info(&format!("Clearing shopping scope of user {}", user_id));

        let entries = self.repository.get_all(user_id).await?;

        // One delete per entry; a failure leaves the earlier deletions in place.
        let mut cleared = 0u64;
        for entry in &entries {
            if let Err(err) = self.repository.delete(&entry.recipe_id, user_id).await {
                self.logger.error(&format!(
                    "Clearing stopped after {} of {} entries: {}",
                    cleared,
                    entries.len(),
                    err
                ));
                return Err(err.into());
            }
            cleared += 1;
        }

        self.logger
            .info(&format!("Cleared {} shopping entries", cleared));
        Ok(cleared)
    }
}
