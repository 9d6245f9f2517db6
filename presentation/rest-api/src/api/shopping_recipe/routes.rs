use std::sync::Arc;
use std::time::Duration;

use futures::future;
use futures::stream::{BoxStream, StreamExt};
use poem_openapi::{
    OpenApi,
    param::Path,
    payload::{EventStream, Json},
};

use business::domain::shopping_entry::use_cases::add_recipe::{
    AddRecipeParams, AddRecipeToShoppingUseCase,
};
use business::domain::shopping_entry::use_cases::clear_all::{
    ClearShoppingParams, ClearShoppingUseCase,
};
use business::domain::shopping_entry::use_cases::get_all::{
    GetShoppingEntriesParams, GetShoppingEntriesUseCase,
};
use business::domain::shopping_entry::use_cases::get_summary::{
    GetShoppingSummaryParams, GetShoppingSummaryUseCase,
};
use business::domain::shopping_entry::use_cases::remove_ingredient::{
    RemoveIngredientParams, RemoveIngredientUseCase,
};
use business::domain::shopping_entry::use_cases::remove_recipe::{
    RemoveRecipeFromShoppingUseCase, RemoveRecipeParams,
};
use business::domain::shopping_entry::use_cases::set_checked::{
    SetIngredientCheckedParams, SetIngredientCheckedUseCase,
};
use business::domain::shopping_entry::use_cases::subscribe::{
    SubscribeShoppingParams, SubscribeShoppingUseCase,
};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::security::FirebaseBearer;
use crate::api::shopping_recipe::dto::{
    AddRecipeRequest, ClearShoppingResponse, RemoveIngredientRequest, SetCheckedRequest,
    ShoppingEntryResponse, ShoppingSnapshotEvent, ShoppingSummaryResponse,
};
use crate::api::tags::ApiTags;

const STREAM_KEEP_ALIVE: Duration = Duration::from_secs(15);

pub struct ShoppingRecipeApi {
    add_use_case: Arc<dyn AddRecipeToShoppingUseCase>,
    remove_recipe_use_case: Arc<dyn RemoveRecipeFromShoppingUseCase>,
    clear_use_case: Arc<dyn ClearShoppingUseCase>,
    set_checked_use_case: Arc<dyn SetIngredientCheckedUseCase>,
    remove_ingredient_use_case: Arc<dyn RemoveIngredientUseCase>,
    subscribe_use_case: Arc<dyn SubscribeShoppingUseCase>,
    get_all_use_case: Arc<dyn GetShoppingEntriesUseCase>,
    summary_use_case: Arc<dyn GetShoppingSummaryUseCase>,
}

impl ShoppingRecipeApi {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        add_use_case: Arc<dyn AddRecipeToShoppingUseCase>,
        remove_recipe_use_case: Arc<dyn RemoveRecipeFromShoppingUseCase>,
        clear_use_case: Arc<dyn ClearShoppingUseCase>,
        set_checked_use_case: Arc<dyn SetIngredientCheckedUseCase>,
        remove_ingredient_use_case: Arc<dyn RemoveIngredientUseCase>,
        subscribe_use_case: Arc<dyn SubscribeShoppingUseCase>,
        get_all_use_case: Arc<dyn GetShoppingEntriesUseCase>,
        summary_use_case: Arc<dyn GetShoppingSummaryUseCase>,
    ) -> Self {
        Self {
            add_use_case,
            remove_recipe_use_case,
            clear_use_case,
            set_checked_use_case,
            remove_ingredient_use_case,
            subscribe_use_case,
            get_all_use_case,
            summary_use_case,
        }
    }
}

/// Recipe-based shopping list API
///
/// Every endpoint is scoped to the authenticated Firebase user.
#[OpenApi]
impl ShoppingRecipeApi {
    /// List shopping recipes
    ///
    /// Returns the current snapshot, oldest entry first.
    #[oai(
        path = "/shopping-recipes",
        method = "get",
        tag = "ApiTags::ShoppingRecipes"
    )]
    async fn get_all(&self, auth: FirebaseBearer) -> GetShoppingEntriesResponse {
        let params = GetShoppingEntriesParams {
            session: auth.session(),
        };

        match self.get_all_use_case.execute(params).await {
            Ok(entries) => GetShoppingEntriesResponse::Ok(Json(
                entries.into_iter().map(Into::into).collect(),
            )),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    401 => GetShoppingEntriesResponse::Unauthorized(json),
                    _ => GetShoppingEntriesResponse::InternalError(json),
                }
            }
        }
    }

    /// Stream shopping snapshots
    ///
    /// Server-Sent Events: the current snapshot first, then a full snapshot
    /// after every change. Closing the connection cancels the subscription.
    #[oai(
        path = "/shopping-recipes/stream",
        method = "get",
        tag = "ApiTags::ShoppingRecipes"
    )]
    async fn stream(&self, auth: FirebaseBearer) -> StreamShoppingResponse {
        let params = SubscribeShoppingParams {
            session: auth.session(),
        };

        match self.subscribe_use_case.execute(params).await {
            Ok(subscription) => {
                let events = subscription
                    .inspect(|snapshot| {
                        if let Err(err) = snapshot {
                            tracing::warn!("Shopping stream closed after error: {err}");
                        }
                    })
                    .take_while(|snapshot| future::ready(snapshot.is_ok()))
                    .filter_map(|snapshot| future::ready(snapshot.ok()))
                    .map(ShoppingSnapshotEvent::from)
                    .boxed();

                StreamShoppingResponse::Ok(EventStream::new(events).keep_alive(STREAM_KEEP_ALIVE))
            }
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    401 => StreamShoppingResponse::Unauthorized(json),
                    _ => StreamShoppingResponse::InternalError(json),
                }
            }
        }
    }

    /// Shopping summary
    ///
    /// Ingredients merged across recipes by exact name. An ingredient counts
    /// as checked only when every recipe listing it has it checked.
    #[oai(
        path = "/shopping-recipes/summary",
        method = "get",
        tag = "ApiTags::ShoppingRecipes"
    )]
    async fn summary(&self, auth: FirebaseBearer) -> GetShoppingSummaryResponse {
        let params = GetShoppingSummaryParams {
            session: auth.session(),
        };

        match self.summary_use_case.execute(params).await {
            Ok(summary) => GetShoppingSummaryResponse::Ok(Json(summary.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    401 => GetShoppingSummaryResponse::Unauthorized(json),
                    _ => GetShoppingSummaryResponse::InternalError(json),
                }
            }
        }
    }

    /// Add a recipe to the shopping list
    ///
    /// Re-adding a recipe updates its title and ingredients in place and
    /// keeps the checks of ingredients that are still listed.
    #[oai(
        path = "/shopping-recipes",
        method = "post",
        tag = "ApiTags::ShoppingRecipes"
    )]
    async fn add(&self, auth: FirebaseBearer, body: Json<AddRecipeRequest>) -> AddRecipeResponse {
        let params = AddRecipeParams {
            session: auth.session(),
            recipe_id: body.0.recipe_id,
            title: body.0.title,
            ingredients: body.0.ingredients,
        };

        match self.add_use_case.execute(params).await {
            Ok(entry) => AddRecipeResponse::Ok(Json(entry.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => AddRecipeResponse::BadRequest(json),
                    401 => AddRecipeResponse::Unauthorized(json),
                    _ => AddRecipeResponse::InternalError(json),
                }
            }
        }
    }

    /// Clear the shopping list
    ///
    /// Removes every recipe. Stops at the first failure; recipes already
    /// removed stay removed.
    #[oai(
        path = "/shopping-recipes",
        method = "delete",
        tag = "ApiTags::ShoppingRecipes"
    )]
    async fn clear(&self, auth: FirebaseBearer) -> ClearShoppingApiResponse {
        let params = ClearShoppingParams {
            session: auth.session(),
        };

        match self.clear_use_case.execute(params).await {
            Ok(count) => ClearShoppingApiResponse::Ok(Json(ClearShoppingResponse { count })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    401 => ClearShoppingApiResponse::Unauthorized(json),
                    _ => ClearShoppingApiResponse::InternalError(json),
                }
            }
        }
    }

    /// Remove a recipe from the shopping list
    ///
    /// Removing a recipe that is not in the list succeeds.
    #[oai(
        path = "/shopping-recipes/:recipe_id",
        method = "delete",
        tag = "ApiTags::ShoppingRecipes"
    )]
    async fn remove_recipe(
        &self,
        auth: FirebaseBearer,
        recipe_id: Path<String>,
    ) -> RemoveRecipeResponse {
        let params = RemoveRecipeParams {
            session: auth.session(),
            recipe_id: recipe_id.0,
        };

        match self.remove_recipe_use_case.execute(params).await {
            Ok(()) => RemoveRecipeResponse::NoContent,
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => RemoveRecipeResponse::BadRequest(json),
                    401 => RemoveRecipeResponse::Unauthorized(json),
                    _ => RemoveRecipeResponse::InternalError(json),
                }
            }
        }
    }

    /// Check or uncheck an ingredient
    ///
    /// Only the given ingredient changes; concurrent toggles of other
    /// ingredients are preserved.
    #[oai(
        path = "/shopping-recipes/:recipe_id/checklist",
        method = "put",
        tag = "ApiTags::ShoppingRecipes"
    )]
    async fn set_checked(
        &self,
        auth: FirebaseBearer,
        recipe_id: Path<String>,
        body: Json<SetCheckedRequest>,
    ) -> EntryMutationResponse {
        let params = SetIngredientCheckedParams {
            session: auth.session(),
            recipe_id: recipe_id.0,
            ingredient: body.0.ingredient,
            checked: body.0.checked,
        };

        match self.set_checked_use_case.execute(params).await {
            Ok(()) => EntryMutationResponse::NoContent,
            Err(err) => EntryMutationResponse::from_error(err),
        }
    }

    /// Remove an ingredient from a recipe
    ///
    /// Drops every occurrence of the ingredient along with its checked state.
    #[oai(
        path = "/shopping-recipes/:recipe_id/ingredients/remove",
        method = "post",
        tag = "ApiTags::ShoppingRecipes"
    )]
    async fn remove_ingredient(
        &self,
        auth: FirebaseBearer,
        recipe_id: Path<String>,
        body: Json<RemoveIngredientRequest>,
    ) -> EntryMutationResponse {
        let params = RemoveIngredientParams {
            session: auth.session(),
            recipe_id: recipe_id.0,
            ingredient: body.0.ingredient,
        };

        match self.remove_ingredient_use_case.execute(params).await {
            Ok(()) => EntryMutationResponse::NoContent,
            Err(err) => EntryMutationResponse::from_error(err),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetShoppingEntriesResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<ShoppingEntryResponse>>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum StreamShoppingResponse {
    #[oai(status = 200)]
    Ok(EventStream<BoxStream<'static, ShoppingSnapshotEvent>>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetShoppingSummaryResponse {
    #[oai(status = 200)]
    Ok(Json<ShoppingSummaryResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum AddRecipeResponse {
    #[oai(status = 200)]
    Ok(Json<ShoppingEntryResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ClearShoppingApiResponse {
    #[oai(status = 200)]
    Ok(Json<ClearShoppingResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum RemoveRecipeResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum EntryMutationResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl EntryMutationResponse {
    fn from_error(err: impl IntoErrorResponse) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => Self::BadRequest(json),
            401 => Self::Unauthorized(json),
            404 => Self::NotFound(json),
            _ => Self::InternalError(json),
        }
    }
}
