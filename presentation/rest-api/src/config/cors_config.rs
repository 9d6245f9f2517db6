use poem::middleware::Cors;

const DEFAULT_ORIGINS: &str = "http://localhost:8081,http://localhost:19006";

/// Initialize CORS middleware for cross-origin requests
///
/// Environment variables:
/// - CORS_ALLOWED_ORIGINS: Comma-separated list of allowed origins
///   (default: the Expo dev server origins "http://localhost:8081,http://localhost:19006")
///
/// Configuration:
/// - Methods: GET, POST, PUT, DELETE, OPTIONS
/// - Headers: content-type, authorization, last-event-id
/// - Credentials: Enabled
pub fn init_cors() -> Cors {
    let allowed_origins =
        std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.to_string());

    Cors::new()
        .allow_origins(parse_origins(&allowed_origins))
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_headers(vec!["content-type", "authorization", "last-event-id"])
        .allow_credentials(true)
}

fn parse_origins(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .collect()
}
