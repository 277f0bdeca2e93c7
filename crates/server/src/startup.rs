use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::photos::FsPhotoStore;

use crate::routes::{self, ServerState, StaticAssets};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the filesystem store into the router. Does not touch the disk.
pub fn build_app(cfg: &AppConfig) -> Router {
    let store = FsPhotoStore::new(
        &cfg.storage.base_upload_folder,
        cfg.storage.public_url_prefix.clone(),
    );
    let state = ServerState { photos: Arc::new(store) };
    routes::build_router(state, StaticAssets::from_config(cfg), build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: prepare directories, bind and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_env(
        &cfg.server.frontend_dir,
        std::path::Path::new(&cfg.storage.base_upload_folder),
    )
    .await?;

    let app = build_app(&cfg);

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        %addr,
        upload_dir = %cfg.storage.base_upload_folder,
        debug = cfg.server.debug,
        "photo store listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
