use std::sync::Arc;

use business::domain::shopping_entry::repository::ShoppingEntryRepository;
use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};
use persistence::memory::repository::InMemoryShoppingRepository;
use persistence::shopping_entry::repository::ShoppingEntryRepositoryPostgres;

use super::error::ConfigError;

/// Backing store for shopping entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Postgres {
        url: String,
        max_connections: u32,
        migrations_path: String,
    },
    Memory,
}

impl StorageConfig {
    /// Environment variables:
    /// - DATABASE_URL: PostgreSQL connection string (unset: in-process store)
    /// - DATABASE_MAX_CONNECTIONS: pool size, at least 2 since live
    ///   subscriptions share one listening connection (default: 5)
    /// - MIGRATIONS_PATH: migrations directory (default: "./migrations")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) else {
            return Ok(Self::Memory);
        };

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n >= 2)
                .ok_or(ConfigError::InvalidVariable("DATABASE_MAX_CONNECTIONS"))?,
            None => 5,
        };
        let migrations_path =
            lookup("MIGRATIONS_PATH").unwrap_or_else(|| "./migrations".to_string());

        Ok(Self::Postgres {
            url,
            max_connections,
            migrations_path,
        })
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres { .. } => "postgres",
            Self::Memory => "memory",
        }
    }

    /// Connects the configured store, applying migrations for PostgreSQL.
    pub async fn init_repository(&self) -> anyhow::Result<Arc<dyn ShoppingEntryRepository>> {
        match self {
            Self::Postgres {
                url,
                max_connections,
                migrations_path,
            } => {
                let config = DatabaseConfig::new(url.clone()).with_max_connections(*max_connections);
                let pool = create_postgres_pool(&config).await?;
                tracing::info!("Connected to PostgreSQL");

                run_migrations(&pool, migrations_path).await?;
                tracing::info!("Migrations applied from {migrations_path}");

                Ok(Arc::new(ShoppingEntryRepositoryPostgres::new(pool)))
            }
            Self::Memory => {
                tracing::warn!("DATABASE_URL not set, shopping entries live in memory only");
                Ok(Arc::new(InMemoryShoppingRepository::new()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_select_memory_store_without_database_url() {
        let config = StorageConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, StorageConfig::Memory);
        assert_eq!(config.backend_name(), "memory");
    }

    #[test]
    fn should_apply_postgres_defaults() {
        let config =
            StorageConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db/shop")]))
                .unwrap();

        assert_eq!(
            config,
            StorageConfig::Postgres {
                url: "postgres://db/shop".to_string(),
                max_connections: 5,
                migrations_path: "./migrations".to_string(),
            }
        );
    }

    #[test]
    fn should_reject_invalid_pool_size() {
        let result = StorageConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/shop"),
            ("DATABASE_MAX_CONNECTIONS", "zero"),
        ]));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidVariable("DATABASE_MAX_CONNECTIONS")
        );
    }

    #[test]
    fn should_reserve_room_for_the_listener_connection() {
        let result = StorageConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/shop"),
            ("DATABASE_MAX_CONNECTIONS", "1"),
        ]));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidVariable("DATABASE_MAX_CONNECTIONS")
        );
    }

    #[tokio::test]
    async fn should_build_memory_repository() {
        let repository = StorageConfig::Memory.init_repository().await.unwrap();
        let user = business::domain::shared::value_objects::UserId::new("uid-1");

        assert!(repository.get_all(&user).await.unwrap().is_empty());
    }
}
