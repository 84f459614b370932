use crate::utils::timestamp;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Serialize, ToSchema)]
pub struct Endpoints {
    #[serde(rename = "GET /solution/:filename")]
    pub get_solution: String,
    #[serde(rename = "POST /solution")]
    pub upload_solution: String,
    #[serde(rename = "GET /gemini?query=your question")]
    pub query_gemini: String,
    #[serde(rename = "GET /health")]
    pub health: String,
}

#[derive(Serialize, ToSchema)]
pub struct IndexResponse {
    pub message: String,
    pub endpoints: Endpoints,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: timestamp(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Available endpoints", body = IndexResponse)
    ),
    tag = "system"
)]
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Ace the Test with the Solution APIs packed with Gemini Integration".to_string(),
        endpoints: Endpoints {
            get_solution: "Get a solution file by filename".to_string(),
            upload_solution: "Upload a file directly (multipart/form-data, field: \"file\")"
                .to_string(),
            query_gemini: "Query Gemini AI".to_string(),
            health: "Health check".to_string(),
        },
    })
}
