use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::UserId;

use super::model::{RecipeDraft, ShoppingEntry};
use super::value_objects::RecipeId;

/// Full-state snapshots of one user's shopping scope, oldest entry first.
/// The first item is the state at subscription time.
pub type SnapshotStream = BoxStream<'static, Result<Vec<ShoppingEntry>, RepositoryError>>;

/// Document store holding `users/{userId}/shoppingRecipes/{recipeId}`.
///
/// Every write touches exactly one entry. `set_checked` and
/// `remove_ingredient` only modify the named ingredient so concurrent writes
/// to different ingredients of the same entry do not overwrite each other.
#[async_trait]
pub trait ShoppingEntryRepository: Send + Sync {
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<ShoppingEntry>, RepositoryError>;
    async fn get_by_id(
        &self,
        recipe_id: &RecipeId,
        user_id: &UserId,
    ) -> Result<ShoppingEntry, RepositoryError>;
    /// Creates the entry or merges the draft into the existing one.
    async fn upsert(
        &self,
        draft: &RecipeDraft,
        user_id: &UserId,
    ) -> Result<ShoppingEntry, RepositoryError>;
    /// `NotFound` when the entry does not exist or does not list `ingredient`.
    async fn set_checked(
        &self,
        recipe_id: &RecipeId,
        ingredient: &str,
        checked: bool,
        user_id: &UserId,
    ) -> Result<(), RepositoryError>;
    /// `NotFound` when the entry does not exist.
    async fn remove_ingredient(
        &self,
        recipe_id: &RecipeId,
        ingredient: &str,
        user_id: &UserId,
    ) -> Result<(), RepositoryError>;
    /// Deleting an absent entry succeeds.
    async fn delete(&self, recipe_id: &RecipeId, user_id: &UserId) -> Result<(), RepositoryError>;
    async fn watch(&self, user_id: &UserId) -> Result<SnapshotStream, RepositoryError>;
}
