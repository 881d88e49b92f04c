use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use ayah_api::auth::jwt::JwtAuthProvider;
use ayah_api::config::ServerConfig;
use ayah_api::router::build_app_router;
use ayah_api::state::AppState;
use ayah_graphql::GraphQlClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ayah_api=debug,ayah_graphql=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        graphql_endpoint = %config.graphql_endpoint,
        default_author_id = config.default_author_id,
        "Loaded server configuration"
    );

    // --- Data service client ---
    let graphql = GraphQlClient::new(
        config.graphql_endpoint.clone(),
        Duration::from_secs(config.upstream_timeout_secs),
    )
    .expect("Failed to build GraphQL HTTP client");

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        auth: Arc::new(JwtAuthProvider::new(config.jwt.clone())),
        graphql: Arc::new(graphql),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
