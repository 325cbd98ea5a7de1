use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::ship::{repository::ShipRepository, DynShipService, ShipService};

use crate::{metrics, openapi::ApiDoc};

pub mod ships;

#[derive(Clone)]
pub struct ServerState {
    pub ships: Arc<DynShipService>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn ShipRepository>) -> Self {
        Self { ships: Arc::new(ShipService::new(repo)) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn prometheus_metrics() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: ship REST routes plus health, metrics and API docs
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        .route("/api-docs/openapi.json", get(openapi_json));

    let rest = Router::new()
        .route("/rest/ships", get(ships::list).post(ships::create))
        .route("/rest/ships/count", get(ships::count))
        .route(
            "/rest/ships/:id",
            get(ships::get).post(ships::update).delete(ships::delete),
        );

    // Compose
    public
        .merge(rest)
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
