use ayah_core::types::{AuthorId, DEFAULT_AUTHOR_ID};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the upstream endpoint and the auth secret have
/// defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Inbound HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// URL of the external GraphQL data service.
    pub graphql_endpoint: String,
    /// Timeout for a single upstream GraphQL call in seconds (default: `10`).
    pub upstream_timeout_secs: u64,
    /// Author whose translations are joined when `author` is absent.
    pub default_author_id: AuthorId,
    /// Session token verification settings.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `GRAPHQL_API_ENDPOINT`  | **required**            |
    /// | `UPSTREAM_TIMEOUT_SECS` | `10`                    |
    /// | `DEFAULT_AUTHOR_ID`     | `105`                   |
    ///
    /// # Panics
    ///
    /// Panics on unparseable numbers or a missing `GRAPHQL_API_ENDPOINT`.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let graphql_endpoint = std::env::var("GRAPHQL_API_ENDPOINT")
            .expect("GRAPHQL_API_ENDPOINT must be set in the environment");

        let upstream_timeout_secs: u64 = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("UPSTREAM_TIMEOUT_SECS must be a valid u64");

        let default_author_id: AuthorId = std::env::var("DEFAULT_AUTHOR_ID")
            .unwrap_or_else(|_| DEFAULT_AUTHOR_ID.to_string())
            .parse()
            .expect("DEFAULT_AUTHOR_ID must be a valid i64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            graphql_endpoint,
            upstream_timeout_secs,
            default_author_id,
            jwt,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
