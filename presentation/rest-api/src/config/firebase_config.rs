use super::error::ConfigError;

/// Firebase project whose ID tokens the API accepts.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    pub project_id: String,
}

impl FirebaseConfig {
    /// Environment variables:
    /// - FIREBASE_PROJECT_ID: Firebase project id (required)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let project_id = lookup("FIREBASE_PROJECT_ID")
            .filter(|id| !id.trim().is_empty())
            .ok_or(ConfigError::MissingVariable("FIREBASE_PROJECT_ID"))?;
        Ok(Self { project_id })
    }

    pub fn issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }
}
