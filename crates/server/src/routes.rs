use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use configs::AppConfig;
use service::photos::PhotoRepository;

use crate::openapi::ApiDoc;

pub mod photos;

#[derive(Clone)]
pub struct ServerState {
    pub photos: Arc<dyn PhotoRepository>,
}

/// Filesystem locations served as-is, next to the JSON API.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    /// Holds `index.html`, served at `/`.
    pub frontend_dir: PathBuf,
    /// Base upload folder, served under `public_url_prefix`.
    pub upload_dir: PathBuf,
    pub public_url_prefix: String,
    pub max_body_bytes: usize,
}

impl StaticAssets {
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            frontend_dir: cfg.server.frontend_dir.clone(),
            upload_dir: PathBuf::from(&cfg.storage.base_upload_folder),
            public_url_prefix: cfg.storage.public_url_prefix.clone(),
            max_body_bytes: cfg.server.max_body_bytes,
        }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: index page, photo API, uploaded files.
pub fn build_router(state: ServerState, assets: StaticAssets, cors: CorsLayer) -> Router {
    let index = ServeFile::new(assets.frontend_dir.join("index.html"));
    let uploads = ServeDir::new(&assets.upload_dir);

    let api = Router::new()
        .route("/upload", post(photos::upload_photo))
        .route("/create_folder", post(photos::create_folder))
        .route("/get_folders", get(photos::get_folders))
        .route("/get_photos/:folder_name", get(photos::get_photos))
        .route("/delete_photo", post(photos::delete_photo))
        .route("/delete_folder", post(photos::delete_folder))
        .layer(DefaultBodyLimit::max(assets.max_body_bytes));

    Router::new()
        .route_service("/", index)
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api)
        .nest_service(&assets.public_url_prefix, uploads)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
