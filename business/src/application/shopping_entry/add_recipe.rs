use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::shopping_entry::errors::ShoppingEntryError;
use crate::domain::shopping_entry::model::{RecipeDraft, ShoppingEntry};
use crate::domain::shopping_entry::repository::ShoppingEntryRepository;
use crate::domain::shopping_entry::use_cases::add_recipe::{
    AddRecipeParams, AddRecipeToShoppingUseCase,
};
use crate::domain::shopping_entry::value_objects::RecipeId;

pub struct AddRecipeToShoppingUseCaseImpl {
    pub repository: Arc<dyn ShoppingEntryRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddRecipeToShoppingUseCase for AddRecipeToShoppingUseCaseImpl {
    async fn execute(&self, params: AddRecipeParams) -> Result<ShoppingEntry, ShoppingEntryError> {
        let user_id = params
            .session
            .user_id()
            .ok_or(ShoppingEntryError::Unauthenticated)?;
        let recipe_id = RecipeId::parse(params.recipe_id)?;

        self.logger.info(&format!(
            "Adding recipe to shopping: {}",
            ShoppingEntry::document_path(user_id, &recipe_id)
        ));

        let draft = RecipeDraft {
            recipe_id,
            title: params.title,
            ingredients: params.ingredients,
        };
        let entry = self.repository.upsert(&draft, user_id).await?;

        self.logger.info(&format!(
            "Shopping entry saved: {} ({} ingredients)",
            entry.recipe_id,
            entry.ingredients().len()
        ));
        Ok(entry)
    }
}
