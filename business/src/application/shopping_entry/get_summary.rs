use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::shopping_entry::errors::ShoppingEntryError;
use crate::domain::shopping_entry::repository::ShoppingEntryRepository;
use crate::domain::shopping_entry::summary::ShoppingSummary;
use crate::domain::shopping_entry::use_cases::get_summary::{
    GetShoppingSummaryParams, GetShoppingSummaryUseCase,
};

pub struct GetShoppingSummaryUseCaseImpl {
    pub repository: Arc<dyn ShoppingEntryRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetShoppingSummaryUseCase for GetShoppingSummaryUseCaseImpl {
    async fn execute(
        &self,
        params: GetShoppingSummaryParams,
    ) -> Result<ShoppingSummary, ShoppingEntryError> {
        let user_id = params
            .session
            .user_id()
            .ok_or(ShoppingEntryError::Unauthenticated)?;

        let entries = self.repository.get_all(user_id).await?;
        let summary = ShoppingSummary::from_entries(&entries);

        self.logger.debug(&format!(
            "Shopping summary: {} recipes, {} ingredients, {} pending",
            summary.recipe_count,
            summary.ingredients.len(),
            summary.pending_count()
        ));
        Ok(summary)
    }
}
