use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bookmarks;
use crate::state::AppState;

/// Bookmark routes, mounted under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookmarks", get(bookmarks::list_bookmarks))
        .route("/bookmark", post(bookmarks::mutate_bookmark))
}
