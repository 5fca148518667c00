use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::seed;
use crate::storage::ContentStore;

pub mod routes;

/// Server state
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
}

/// Listener and static-file settings for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub addr: SocketAddr,
    /// Built frontend to serve for non-API paths
    pub static_dir: Option<PathBuf>,
}

/// Build the application router.
///
/// API routes live under `/api`. Other paths fall through to the static
/// directory when one is given, with `index.html` for client-side routes.
pub fn build_router(state: Arc<AppState>, static_dir: Option<PathBuf>) -> Router {
    let api = Router::new()
        .route("/profile", get(routes::get_profile))
        .route("/skills", get(routes::list_skills))
        .route("/projects", get(routes::list_projects))
        .route("/experience", get(routes::list_experience))
        .route("/education", get(routes::list_education))
        .route("/messages", post(routes::create_message))
        .fallback(routes::api_not_found);

    let mut app = Router::new().nest("/api", api);
    if let Some(dir) = static_dir {
        let index = dir.join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Seed the store, then serve until Ctrl-C or SIGTERM.
pub async fn start_server(options: ServerOptions, store: Arc<dyn ContentStore>) -> anyhow::Result<()> {
    let state = Arc::new(AppState { store: store.clone() });
    let app = build_router(state, options.static_dir.clone());

    let report = seed::seed_store(store.as_ref())?;
    tracing::debug!("Seed: {}", report);

    let listener = tokio::net::TcpListener::bind(options.addr).await?;
    tracing::info!("Starting server on {} ({} store)", options.addr, store.backend());
    crate::ui::header(&format!("Server running at http://{}", options.addr));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing store");
    store.close()?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
