//! HS256 session tokens.
//!
//! The session provider issues a signed JWT whose `sub` is the user id. The
//! same raw token is forwarded to the data service as the bearer credential,
//! so verifying it here yields both the session and the access token.

use async_trait::async_trait;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{AuthProvider, Session};

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Lifetime of tokens minted by [`generate_session_token`], in minutes.
const DEFAULT_SESSION_TTL_MINS: i64 = 60;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user id as known to the data service.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for session token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the session provider.
    pub secret: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var       | Required |
    /// |---------------|----------|
    /// | `AUTH_SECRET` | **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("AUTH_SECRET").expect("AUTH_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "AUTH_SECRET must not be empty");
        Self { secret }
    }
}

/// Mint a session token for `user_id`.
pub fn generate_session_token(
    user_id: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + DEFAULT_SESSION_TTL_MINS * 60,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Find the raw session token: the session cookie first, then a
/// `Authorization: Bearer` header.
fn raw_token(parts: &Parts) -> Option<&str> {
    let from_cookie = parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value);

    from_cookie
        .or_else(|| {
            parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
        })
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// [`AuthProvider`] backed by HS256 session tokens.
pub struct JwtAuthProvider {
    config: JwtConfig,
}

impl JwtAuthProvider {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn session(&self, parts: &Parts) -> Option<Session> {
        let token = raw_token(parts)?;
        match validate_token(token, &self.config) {
            Ok(claims) => Some(Session {
                user_id: claims.sub,
                expires_at: chrono::DateTime::from_timestamp(claims.exp, 0),
            }),
            Err(e) => {
                tracing::debug!(error = %e, "Session token rejected");
                None
            }
        }
    }

    async fn access_token(&self, parts: &Parts) -> Option<String> {
        let token = raw_token(parts)?;
        validate_token(token, &self.config)
            .ok()
            .map(|_| token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        }
    }

    fn parts_with(header: (&str, String)) -> Parts {
        let (parts, ()) = Request::builder()
            .uri("/api/bookmarks")
            .header(header.0, header.1)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_generate_and_validate_token() {
        let config = test_config();
        let token = generate_session_token("user-123", &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "user-1".to_string(),
            exp: now - 300, // well past the default leeway
            iat: now - 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let token = generate_session_token("user-1", &JwtConfig { secret: "alpha".into() }).unwrap();
        assert!(validate_token(&token, &JwtConfig { secret: "bravo".into() }).is_err());
    }

    #[tokio::test]
    async fn session_is_read_from_cookie() {
        let config = test_config();
        let token = generate_session_token("user-9", &config).unwrap();
        let parts = parts_with(("cookie", format!("theme=dark; {SESSION_COOKIE}={token}")));
        let provider = JwtAuthProvider::new(config);

        let session = provider.session(&parts).await.unwrap();
        assert_eq!(session.user_id, "user-9");
        assert!(session.expires_at.is_some());
        assert_eq!(provider.access_token(&parts).await, Some(token));
    }

    #[tokio::test]
    async fn session_is_read_from_bearer_header() {
        let config = test_config();
        let token = generate_session_token("user-9", &config).unwrap();
        let parts = parts_with(("authorization", format!("Bearer {token}")));
        let provider = JwtAuthProvider::new(config);

        assert!(provider.session(&parts).await.is_some());
        assert_eq!(provider.access_token(&parts).await, Some(token));
    }

    #[tokio::test]
    async fn forged_token_yields_neither_session_nor_token() {
        let forged = generate_session_token("user-9", &JwtConfig { secret: "other".into() }).unwrap();
        let parts = parts_with(("authorization", format!("Bearer {forged}")));
        let provider = JwtAuthProvider::new(test_config());

        assert!(provider.session(&parts).await.is_none());
        assert!(provider.access_token(&parts).await.is_none());
    }
}
