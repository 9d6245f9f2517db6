use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::shopping_entry::errors::ShoppingEntryError;
use crate::domain::shopping_entry::repository::ShoppingEntryRepository;
use crate::domain::shopping_entry::use_cases::remove_ingredient::{
    RemoveIngredientParams, RemoveIngredientUseCase,
};
use crate::domain::shopping_entry::value_objects::RecipeId;

pub struct RemoveIngredientUseCaseImpl {
    pub repository: Arc<dyn ShoppingEntryRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveIngredientUseCase for RemoveIngredientUseCaseImpl {
    async fn execute(&self, params: RemoveIngredientParams) -> Result<(), ShoppingEntryError> {
        let user_id = params
            .session
            .user_id()
            .ok_or(ShoppingEntryError::Unauthenticated)?;
        let recipe_id = RecipeId::parse(params.recipe_id)?;

        self.logger.info(&format!(
            "Removing ingredient '{}' from {}",
            params.ingredient, recipe_id
        ));

        // List element and checked state go away in the same write.
        self.repository
            .remove_ingredient(&recipe_id, &params.ingredient, user_id)
            .await
            .map_err(ShoppingEntryError::from_lookup)?;

        Ok(())
    }
}
