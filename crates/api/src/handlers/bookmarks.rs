//! Handlers for the bookmark list and mutation endpoints.
//!
//! Both endpoints require [`AuthSession`] and translate the HTTP request into
//! a parameterized GraphQL operation run with the caller's bearer token. The
//! data service's `data` object is returned to the client verbatim.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use ayah_core::bookmark::{BookmarkCommand, BookmarkMutation};
use ayah_core::query::{
    delete_bookmark_mutation, list_bookmarks_query, upsert_bookmark_mutation, SearchTerm,
};
use ayah_core::types::AuthorId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthSession;
use crate::state::AppState;

/// Client-facing message for a failed list query.
pub const LIST_FAILURE: &str = "Error while fetching bookmarks";

/// Client-facing message for a failed add/remove mutation.
pub const MUTATION_FAILURE: &str = "Error while adding/removing bookmark";

/// Query parameters for `GET /api/bookmarks`.
#[derive(Debug, Deserialize)]
pub struct ListBookmarksParams {
    pub author: Option<String>,
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

impl ListBookmarksParams {
    /// Absent or empty `author` falls back to `default`.
    fn author_id(&self, default: AuthorId) -> AppResult<AuthorId> {
        match self.author.as_deref().map(str::trim) {
            None | Some("") => Ok(default),
            Some(raw) => raw.parse().map_err(|_| {
                AppError::BadRequest(format!("author must be an integer, got '{raw}'"))
            }),
        }
    }
}

/// GET /api/bookmarks
///
/// List the caller's bookmarks, newest-updated first, optionally filtered by
/// `searchTerm` across notes, labels, verse text, transcription and the
/// selected author's translation.
pub async fn list_bookmarks(
    auth: AuthSession,
    State(state): State<AppState>,
    Query(params): Query<ListBookmarksParams>,
) -> AppResult<impl IntoResponse> {
    let author_id = params.author_id(state.config.default_author_id)?;
    let search = SearchTerm::parse(params.search_term.as_deref());
    let request = list_bookmarks_query(search.as_ref(), author_id);

    let data = state
        .graphql
        .execute(&request, &auth.token)
        .await
        .map_err(|source| AppError::Upstream {
            message: LIST_FAILURE,
            source,
        })?;

    tracing::debug!(
        user_id = %auth.user_id,
        author_id,
        filtered = search.is_some(),
        "Bookmarks listed"
    );

    Ok(Json(data))
}

/// POST /api/bookmark
///
/// `action: "add"` upserts on `(userId, bookmarkKey)`; `action: "remove"`
/// deletes that row. The body is parsed as JSON whatever its content type.
pub async fn mutate_bookmark(
    auth: AuthSession,
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let mutation: BookmarkMutation = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid bookmark request: {e}")))?;
    let command = mutation.into_command()?;

    let request = match &command {
        BookmarkCommand::Add(input) => upsert_bookmark_mutation(&auth.user_id, input),
        BookmarkCommand::Remove { bookmark_key } => {
            delete_bookmark_mutation(&auth.user_id, bookmark_key)
        }
    };

    let data = state
        .graphql
        .execute(&request, &auth.token)
        .await
        .map_err(|source| AppError::Upstream {
            message: MUTATION_FAILURE,
            source,
        })?;

    match &command {
        BookmarkCommand::Add(input) => tracing::info!(
            user_id = %auth.user_id,
            bookmark_key = %input.bookmark_key,
            labels = input.labels.len(),
            "Bookmark saved"
        ),
        BookmarkCommand::Remove { bookmark_key } => tracing::info!(
            user_id = %auth.user_id,
            bookmark_key = %bookmark_key,
            "Bookmark removed"
        ),
    }

    Ok(Json(data))
}
