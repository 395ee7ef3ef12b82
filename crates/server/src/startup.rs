use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use service::store::{CollectionStore, FileStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the file store into the router. Nothing touches the disk until a request arrives.
pub fn build_app(cfg: &AppConfig) -> Router {
    let store: Arc<dyn CollectionStore> = Arc::new(FileStore::new(cfg.storage.root_dir.clone()));
    let state = ServerState::new(store);
    routes::build_router(state, build_cors(), &cfg.storage)
}

/// Bind and serve with an already validated config until Ctrl+C.
pub async fn serve(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_env(&cfg.storage.root_dir, &cfg.storage.index_file).await?;

    let app = build_app(&cfg);
    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(
        %addr,
        root_dir = %cfg.storage.root_dir.display(),
        index_file = %cfg.storage.index_file,
        "starting access-hub server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}

/// Public entry: load config, build the app and run the HTTP server.
/// `.env` and the tracing subscriber are set up by the binary before this runs.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    serve(cfg).await
}
