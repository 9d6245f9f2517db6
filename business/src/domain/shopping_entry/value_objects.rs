use serde::{Deserialize, Serialize};

use super::errors::ShoppingEntryError;

/// Identifier of a recipe inside a user's shopping scope.
///
/// Doubles as the document id under `users/{userId}/shoppingRecipes/`, so it
/// can be neither blank nor contain a path separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn parse(id: impl Into<String>) -> Result<Self, ShoppingEntryError> {
        let id = id.into();
        if id.trim().is_empty() || id.contains('/') {
            return Err(ShoppingEntryError::InvalidRecipeId);
        }
        Ok(Self(id))
    }

    /// Constructor for ids already persisted in the repository (no validation).
    pub fn from_repository(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
