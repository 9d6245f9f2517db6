use std::sync::Arc;

use business::application::shopping_entry::add_recipe::AddRecipeToShoppingUseCaseImpl;
use business::application::shopping_entry::clear_all::ClearShoppingUseCaseImpl;
use business::application::shopping_entry::get_all::GetShoppingEntriesUseCaseImpl;
use business::application::shopping_entry::get_summary::GetShoppingSummaryUseCaseImpl;
use business::application::shopping_entry::remove_ingredient::RemoveIngredientUseCaseImpl;
use business::application::shopping_entry::remove_recipe::RemoveRecipeFromShoppingUseCaseImpl;
use business::application::shopping_entry::set_checked::SetIngredientCheckedUseCaseImpl;
use business::application::shopping_entry::subscribe::SubscribeShoppingUseCaseImpl;
use business::domain::logger::Logger;
use business::domain::shopping_entry::repository::ShoppingEntryRepository;
use logger::TracingLogger;

use crate::api::health::routes::Api as HealthApi;
use crate::api::security::FirebaseTokenVerifier;
use crate::api::shopping_recipe::routes::ShoppingRecipeApi;
use crate::config::app_config::AppConfig;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub shopping_recipe_api: ShoppingRecipeApi,
    pub token_verifier: Arc<FirebaseTokenVerifier>,
}

impl DependencyContainer {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
        let health_api = HealthApi::new(config.storage.backend_name());

        // Infrastructure adapters
        let repository: Arc<dyn ShoppingEntryRepository> =
            config.storage.init_repository().await?;
        let token_verifier = Arc::new(FirebaseTokenVerifier::new(config.firebase.clone()));

        // Shopping use cases
        let add_use_case = Arc::new(AddRecipeToShoppingUseCaseImpl {
            repository: repository.clone(),
            logger: logger.clone(),
        });
        let remove_recipe_use_case = Arc::new(RemoveRecipeFromShoppingUseCaseImpl {
            repository: repository.clone(),
            logger: logger.clone(),
        });
        let clear_use_case = Arc::new(ClearShoppingUseCaseImpl {
            repository: repository.clone(),
            logger: logger.clone(),
        });
        let set_checked_use_case = Arc::new(SetIngredientCheckedUseCaseImpl {
            repository: repository.clone(),
            logger: logger.clone(),
        });
        let remove_ingredient_use_case = Arc::new(RemoveIngredientUseCaseImpl {
            repository: repository.clone(),
            logger: logger.clone(),
        });
        let subscribe_use_case = Arc::new(SubscribeShoppingUseCaseImpl {
            repository: repository.clone(),
            logger: logger.clone(),
        });
        let get_all_use_case = Arc::new(GetShoppingEntriesUseCaseImpl {
            repository: repository.clone(),
            logger: logger.clone(),
        });
        let summary_use_case = Arc::new(GetShoppingSummaryUseCaseImpl { repository, logger });

        let shopping_recipe_api = ShoppingRecipeApi::new(
            add_use_case,
            remove_recipe_use_case,
            clear_use_case,
            set_checked_use_case,
            remove_ingredient_use_case,
            subscribe_use_case,
            get_all_use_case,
            summary_use_case,
        );

        Ok(Self {
            health_api,
            shopping_recipe_api,
            token_verifier,
        })
    }
}
