pub mod api;
pub mod config;
pub mod services;
pub mod utils;

use crate::config::GatewayConfig;
use crate::services::gemini::TextGenerator;
use crate::services::storage::StorageService;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
};
use crate::api::middleware::request_id::REQUEST_ID_HEADER;
use axum::http::Request;
use std::sync::Arc;
use tower_http::LatencyUnit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Headroom on top of `max_file_size` for multipart boundaries and part headers
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::health::index,
        api::handlers::health::health_check,
        api::handlers::solutions::get_solution,
        api::handlers::solutions::upload_solution,
        api::handlers::gemini::query_gemini,
    ),
    components(
        schemas(
            api::error::ErrorResponse,
            api::handlers::health::HealthResponse,
            api::handlers::health::IndexResponse,
            api::handlers::health::Endpoints,
            api::handlers::solutions::UploadResponse,
            api::handlers::solutions::UploadForm,
            api::handlers::gemini::GeminiResponse,
        )
    ),
    tags(
        (name = "solutions", description = "Store and fetch solution files"),
        (name = "gemini", description = "Gemini query proxy"),
        (name = "system", description = "Health and discovery")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub storage: Arc<dyn StorageService>,
    /// `None` when no Gemini API key is configured
    pub generator: Option<Arc<dyn TextGenerator>>,
}

pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.max_file_size + MULTIPART_OVERHEAD;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(api::handlers::health::index))
        .route("/health", get(api::handlers::health::health_check))
        .route("/solution", post(api::handlers::solutions::upload_solution))
        .route(
            "/solution/*filename",
            get(api::handlers::solutions::get_solution),
        )
        .route("/gemini", get(api::handlers::gemini::query_gemini))
        // Inside the request-id layer so every span carries the assigned id
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let request_id = request
                        .headers()
                        .get(&REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default();
                    tracing::info_span!(
                        "gateway_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %request_id,
                    )
                })
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
