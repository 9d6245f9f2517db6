use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::shopping_entry::errors::ShoppingEntryError;
use crate::domain::shopping_entry::repository::ShoppingEntryRepository;
use crate::domain::shopping_entry::use_cases::set_checked::{
    SetIngredientCheckedParams, SetIngredientCheckedUseCase,
};
use crate::domain::shopping_entry::value_objects::RecipeId;

pub struct SetIngredientCheckedUseCaseImpl {
    pub repository: Arc<dyn ShoppingEntryRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SetIngredientCheckedUseCase for SetIngredientCheckedUseCaseImpl {
    async fn execute(&self, params: SetIngredientCheckedParams) -> Result<(), ShoppingEntryError> {
        let user_id = params
            .session
            .user_id()
            .ok_or(ShoppingEntryError::Unauthenticated)?;
        let recipe_id = RecipeId::parse(params.recipe_id)?;

        self.logger.debug(&format!(
            "Setting '{}' of {} to checked={}",
            params.ingredient, recipe_id, params.checked
        ));

        let entry = self
            .repository
            .get_by_id(&recipe_id, user_id)
            .await
            .map_err(ShoppingEntryError::from_lookup)?;

        if !entry.checklist.contains(&params.ingredient) {
            self.logger.warn(&format!(
                "Ingredient '{}' is not listed in {}",
                params.ingredient, recipe_id
            ));
            return Err(ShoppingEntryError::IngredientNotFound);
        }

        // Only the one ingredient is written; the rest of the entry is untouched.
        self.repository
            .set_checked(&recipe_id, &params.ingredient, params.checked, user_id)
            .await
            .map_err(ShoppingEntryError::from_lookup)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::shared::session::Session;
    use crate::domain::shared::value_objects::UserId;
    use crate::domain::shopping_entry::model::{RecipeDraft, ShoppingEntry};
    use crate::domain::shopping_entry::repository::SnapshotStream;
    use mockall::mock;

    mock! {
        pub ShoppingEntryRepo {}

        #[async_trait]
        impl ShoppingEntryRepository for ShoppingEntryRepo {
            async fn get_all(&self, user_id: &UserId) -> Result<Vec<ShoppingEntry>, RepositoryError>;
            async fn get_by_id(&self, recipe_id: &RecipeId, user_id: &UserId) -> Result<ShoppingEntry, RepositoryError>;
            async fn upsert(&self, draft: &RecipeDraft, user_id: &UserId) -> Result<ShoppingEntry, RepositoryError>;
            async fn set_checked(&self, recipe_id: &RecipeId, ingredient: &str, checked: bool, user_id: &UserId) -> Result<(), RepositoryError>;
            async fn remove_ingredient(&self, recipe_id: &RecipeId, ingredient: &str, user_id: &UserId) -> Result<(), RepositoryError>;
            async fn delete(&self, recipe_id: &RecipeId, user_id: &UserId) -> Result<(), RepositoryError>;
            async fn watch(&self, user_id: &UserId) -> Result<SnapshotStream, RepositoryError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn test_session() -> Session {
        Session::authenticated("test-user-id")
    }

    fn entry(id: &str, ingredients: &[&str]) -> ShoppingEntry {
        ShoppingEntry::new(RecipeDraft {
            recipe_id: RecipeId::parse(id).unwrap(),
            title: id.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn params(ingredient: &str, checked: bool) -> SetIngredientCheckedParams {
        SetIngredientCheckedParams {
            session: test_session(),
            recipe_id: "r1".to_string(),
            ingredient: ingredient.to_string(),
            checked,
        }
    }

    #[tokio::test]
    async fn should_write_only_the_target_ingredient() {
        let mut mock_repo = MockShoppingEntryRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(|_, _| Ok(entry("r1", &["Pasta", "Salt"])));
        mock_repo
            .expect_set_checked()
            .withf(|recipe_id, ingredient, checked, _| {
                recipe_id.as_str() == "r1" && ingredient == "Salt" && *checked
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let use_case = SetIngredientCheckedUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case.execute(params("Salt", true)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_return_not_found_when_entry_missing() {
        let mut mock_repo = MockShoppingEntryRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let use_case = SetIngredientCheckedUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case.execute(params("Salt", true)).await;

        assert!(matches!(result.unwrap_err(), ShoppingEntryError::NotFound));
    }

    #[tokio::test]
    async fn should_reject_ingredient_not_in_entry() {
        let mut mock_repo = MockShoppingEntryRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(|_, _| Ok(entry("r1", &["Pasta"])));

        let use_case = SetIngredientCheckedUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case.execute(params("Salt", true)).await;

        assert!(matches!(
            result.unwrap_err(),
            ShoppingEntryError::IngredientNotFound
        ));
    }

    #[tokio::test]
    async fn should_report_ingredient_removed_between_read_and_write() {
        let mut mock_repo = MockShoppingEntryRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(|_, _| Ok(entry("r1", &["Pasta", "Salt"])));
        mock_repo
            .expect_set_checked()
            .times(1)
            .returning(|_, _, _, _| Err(RepositoryError::ItemNotFound));

        let use_case = SetIngredientCheckedUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case.execute(params("Salt", true)).await;

        assert!(matches!(
            result.unwrap_err(),
            ShoppingEntryError::IngredientNotFound
        ));
    }

    #[tokio::test]
    async fn should_reject_unauthenticated() {
        let use_case = SetIngredientCheckedUseCaseImpl {
            repository: Arc::new(MockShoppingEntryRepo::new()),
            logger: mock_logger(),
        };

        let mut anonymous = params("Salt", true);
        anonymous.session = Session::anonymous();
        let result = use_case.execute(anonymous).await;

        assert!(matches!(
            result.unwrap_err(),
            ShoppingEntryError::Unauthenticated
        ));
    }
}
