use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::shopping_entry::errors::ShoppingEntryError;
use crate::domain::shopping_entry::model::ShoppingEntry;
use crate::domain::shopping_entry::repository::ShoppingEntryRepository;
use crate::domain::shopping_entry::use_cases::remove_recipe::{
    RemoveRecipeFromShoppingUseCase, RemoveRecipeParams,
};
use crate::domain::shopping_entry::value_objects::RecipeId;

pub struct RemoveRecipeFromShoppingUseCaseImpl {
    pub repository: Arc<dyn ShoppingEntryRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveRecipeFromShoppingUseCase for RemoveRecipeFromShoppingUseCaseImpl {
    async fn execute(&self, params: RemoveRecipeParams) -> Result<(), ShoppingEntryError> {
        let user_id = params
            .session
            .user_id()
            .ok_or(ShoppingEntryError::Unauthenticated)?;
        let recipe_id = RecipeId::parse(params.recipe_id)?;

        self.logger.info(&format!(
            "Removing recipe from shopping: {}",
            ShoppingEntry::document_path(user_id, &recipe_id)
        ));

        self.repository.delete(&recipe_id, user_id).await?;

        self.logger
            .info(&format!("Shopping entry removed: {}", recipe_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::shared::session::Session;
    use crate::domain::shared::value_objects::UserId;
    use crate::domain::shopping_entry::model::RecipeDraft;
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

    #[tokio::test]
    async fn should_delete_entry_by_recipe_id() {
        let mut mock_repo = MockShoppingEntryRepo::new();
        mock_repo
            .expect_delete()
            .withf(|recipe_id, user_id| {
                recipe_id.as_str() == "r1" && user_id.as_str() == "test-user-id"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = RemoveRecipeFromShoppingUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(RemoveRecipeParams {
                session: test_session(),
                recipe_id: "r1".to_string(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_reject_unauthenticated() {
        let use_case = RemoveRecipeFromShoppingUseCaseImpl {
            repository: Arc::new(MockShoppingEntryRepo::new()),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(RemoveRecipeParams {
                session: Session::anonymous(),
                recipe_id: "r1".to_string(),
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ShoppingEntryError::Unauthenticated
        ));
    }

    #[tokio::test]
    async fn should_propagate_repository_failure() {
        let mut mock_repo = MockShoppingEntryRepo::new();
        mock_repo
            .expect_delete()
            .returning(|_, _| Err(RepositoryError::DatabaseError));

        let use_case = RemoveRecipeFromShoppingUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(RemoveRecipeParams {
                session: test_session(),
                recipe_id: "r1".to_string(),
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ShoppingEntryError::Repository(RepositoryError::DatabaseError)
        ));
    }
}
