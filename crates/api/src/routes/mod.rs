pub mod bookmarks;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /bookmarks        list (GET, auth required)
/// /bookmark         add / remove (POST, auth required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(bookmarks::router())
}
