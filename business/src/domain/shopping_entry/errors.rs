#[derive(Debug, thiserror::Error)]
pub enum ShoppingEntryError {
    #[error("auth.unauthenticated")]
    Unauthenticated,
    #[error("shopping_entry.invalid_recipe_id")]
    InvalidRecipeId,
    #[error("shopping_entry.not_found")]
    NotFound,
    #[error("shopping_entry.ingredient_not_found")]
    IngredientNotFound,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}

impl ShoppingEntryError {
    /// Maps repository misses to the entry-level `NotFound` (no entry) or
    /// `IngredientNotFound` (entry without that ingredient), keeping any
    /// other failure opaque.
    pub fn from_lookup(err: crate::domain::errors::RepositoryError) -> Self {
        match err {
            crate::domain::errors::RepositoryError::NotFound => ShoppingEntryError::NotFound,
            crate::domain::errors::RepositoryError::ItemNotFound => {
                ShoppingEntryError::IngredientNotFound
            }
            other => ShoppingEntryError::Repository(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;

    #[test]
    fn should_distinguish_missing_entry_from_missing_ingredient() {
        assert!(matches!(
            ShoppingEntryError::from_lookup(RepositoryError::NotFound),
            ShoppingEntryError::NotFound
        ));
        assert!(matches!(
            ShoppingEntryError::from_lookup(RepositoryError::ItemNotFound),
            ShoppingEntryError::IngredientNotFound
        ));
        assert!(matches!(
            ShoppingEntryError::from_lookup(RepositoryError::DatabaseError),
            ShoppingEntryError::Repository(RepositoryError::DatabaseError)
        ));
    }
}
