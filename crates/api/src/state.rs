use std::sync::Arc;

use ayah_graphql::GraphQlExecutor;

use crate::auth::AuthProvider;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the collaborators are trait objects so tests can
/// substitute recording fakes.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Session lookup and token derivation.
    pub auth: Arc<dyn AuthProvider>,
    /// External GraphQL data service.
    pub graphql: Arc<dyn GraphQlExecutor>,
}
