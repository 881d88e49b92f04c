//! Session authentication.
//!
//! - [`AuthProvider`] -- the capability the endpoints consult: a session
//!   lookup and an access-token derivation, checked independently.
//! - [`jwt`] -- the default provider, verifying HS256 session tokens.

pub mod jwt;

use async_trait::async_trait;
use axum::http::request::Parts;
use ayah_core::types::{Timestamp, UserId};

/// The signed-in user behind a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: UserId,
    pub expires_at: Option<Timestamp>,
}

/// Resolves the caller's session and upstream credential from a request.
///
/// A session may exist while no token can be derived; callers must treat
/// either lookup returning `None` as unauthenticated.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn session(&self, parts: &Parts) -> Option<Session>;

    /// Raw bearer token to forward to the data service.
    async fn access_token(&self, parts: &Parts) -> Option<String>;
}
