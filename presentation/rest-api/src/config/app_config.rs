use super::{
    cors_config, error::ConfigError, firebase_config::FirebaseConfig,
    server_config::ServerConfig, storage_config::StorageConfig,
};
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub firebase: FirebaseConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            firebase: FirebaseConfig::from_env()?,
            storage: StorageConfig::from_env()?,
        })
    }
}
