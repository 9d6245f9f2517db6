use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::shopping_entry::errors::ShoppingEntryError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for ShoppingEntryError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            ShoppingEntryError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                "auth.unauthenticated",
            ),
            ShoppingEntryError::InvalidRecipeId => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "shopping_entry.invalid_recipe_id",
            ),
            ShoppingEntryError::NotFound => {
                (StatusCode::NOT_FOUND, "NotFound", "shopping_entry.not_found")
            }
            ShoppingEntryError::IngredientNotFound => (
                StatusCode::NOT_FOUND,
                "NotFound",
                "shopping_entry.ingredient_not_found",
            ),
            ShoppingEntryError::Repository(err) => {
                tracing::error!("Shopping repository failure: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "repository.persistence",
                )
            }
        };

        (status, ErrorResponse::json(name, message))
    }
}
