use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config.missing_variable: {0}")]
    MissingVariable(&'static str),
    #[error("config.invalid_variable: {0}")]
    InvalidVariable(&'static str),
}
