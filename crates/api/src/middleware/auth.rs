//! Session authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ayah_core::error::CoreError;
use ayah_core::types::UserId;

use crate::error::AppError;
use crate::state::AppState;

/// Message returned when the request carries no session.
pub const SIGN_IN_REQUIRED: &str =
    "You must be signed in to view the protected content on this page.";

/// Message returned when a session exists but no token can be derived.
pub const TOKEN_UNAVAILABLE: &str = "Unable to derive an access token for this session.";

/// Authenticated caller: the session's user id plus the bearer token to
/// forward to the data service.
///
/// Rejects with 401 before the handler runs, so no upstream call is ever
/// made for an unauthenticated request.
///
/// ```ignore
/// async fn my_handler(auth: AuthSession) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %auth.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: UserId,
    pub token: String,
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(session) = state.auth.session(parts).await else {
            tracing::warn!(path = %parts.uri.path(), "Rejected request without session");
            return Err(AppError::Core(CoreError::Unauthorized(
                SIGN_IN_REQUIRED.into(),
            )));
        };

        let Some(token) = state.auth.access_token(parts).await else {
            tracing::warn!(
                path = %parts.uri.path(),
                user_id = %session.user_id,
                "Rejected request: session without access token"
            );
            return Err(AppError::Core(CoreError::Unauthorized(
                TOKEN_UNAVAILABLE.into(),
            )));
        };

        Ok(AuthSession {
            user_id: session.user_id,
            token,
        })
    }
}
