use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::{Algorithm, DecodingKey, Header, Validation, decode, decode_header};
use poem::Request;
use poem_openapi::SecurityScheme;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::RwLock;

use business::domain::shared::session::Session;
use business::domain::shared::value_objects::UserId;

use crate::config::firebase_config::FirebaseConfig;

const GOOGLE_CERTS_URL: &str =
    "https://www.googleapis.com/robot/v1/metadata/x509/securetoken@system.gserviceaccount.com";
const CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("auth.certs_fetch_failed: {0}")]
    CertsFetch(String),
    #[error("auth.cert_decode_failed: {0}")]
    CertDecode(String),
    #[error("auth.invalid_token_header: {0}")]
    InvalidHeader(String),
    #[error("auth.missing_kid")]
    MissingKid,
    #[error("auth.unknown_kid")]
    UnknownKid,
    #[error("auth.token_validation_failed: {0}")]
    Validation(String),
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
}

struct CachedCerts {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Instant,
}

/// Verifies Firebase ID tokens against Google's rotating signing certs.
pub struct FirebaseTokenVerifier {
    config: FirebaseConfig,
    http: reqwest::Client,
    certs: RwLock<Option<CachedCerts>>,
}

impl FirebaseTokenVerifier {
    pub fn new(config: FirebaseConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            certs: RwLock::new(None),
        }
    }

    /// Returns the Firebase uid (`sub`) of a valid token.
    pub async fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let keys = self.decoding_keys(false).await?;
        match decode_uid(token, &keys, &self.config) {
            // Google rotated its certs since the last fetch.
            Err(AuthError::UnknownKid) => {
                let keys = self.decoding_keys(true).await?;
                decode_uid(token, &keys, &self.config)
            }
            other => other,
        }
    }

    async fn decoding_keys(&self, force: bool) -> Result<HashMap<String, DecodingKey>, AuthError> {
        if !force {
            let cache = self.certs.read().await;
            if let Some(cached) = cache.as_ref()
                && cached.fetched_at.elapsed() < CACHE_TTL
            {
                return Ok(cached.keys.clone());
            }
        }

        let keys = self.fetch_google_certs().await?;
        *self.certs.write().await = Some(CachedCerts {
            keys: keys.clone(),
            fetched_at: Instant::now(),
        });

        Ok(keys)
    }

    async fn fetch_google_certs(&self) -> Result<HashMap<String, DecodingKey>, AuthError> {
        let response: HashMap<String, String> = self
            .http
            .get(GOOGLE_CERTS_URL)
            .send()
            .await
            .map_err(|e| AuthError::CertsFetch(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::CertsFetch(e.to_string()))?;

        let mut keys = HashMap::new();
        for (kid, pem) in response {
            let key = DecodingKey::from_rsa_pem(pem.as_bytes())
                .map_err(|e| AuthError::CertDecode(e.to_string()))?;
            keys.insert(kid, key);
        }

        Ok(keys)
    }
}

fn decode_uid(
    token: &str,
    keys: &HashMap<String, DecodingKey>,
    config: &FirebaseConfig,
) -> Result<UserId, AuthError> {
    let header: Header =
        decode_header(token).map_err(|e| AuthError::InvalidHeader(e.to_string()))?;
    let kid = header.kid.ok_or(AuthError::MissingKid)?;
    let decoding_key = keys.get(&kid).ok_or(AuthError::UnknownKid)?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[&config.project_id]);
    validation.set_issuer(&[config.issuer()]);
    validation.validate_exp = true;

    let token_data = decode::<FirebaseClaims>(token, decoding_key, &validation)
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    if token_data.claims.sub.is_empty() {
        return Err(AuthError::Validation("empty sub".to_string()));
    }
    Ok(UserId::new(token_data.claims.sub))
}

/// Firebase Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    bearer_format = "JWT",
    checker = "firebase_bearer_checker"
)]
pub struct FirebaseBearer(pub UserId);

impl FirebaseBearer {
    pub fn session(&self) -> Session {
        Session::authenticated(self.0.clone())
    }
}

async fn firebase_bearer_checker(
    req: &Request,
    bearer: poem_openapi::auth::Bearer,
) -> Option<UserId> {
    let Some(verifier) = req.data::<Arc<FirebaseTokenVerifier>>() else {
        tracing::error!("Firebase token verifier missing from request data");
        return None;
    };

    match verifier.verify(&bearer.token).await {
        Ok(uid) => Some(uid),
        Err(e) => {
            tracing::warn!("Firebase auth failed: {e}");
            None
        }
    }
}
