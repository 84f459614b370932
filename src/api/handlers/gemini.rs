use crate::AppState;
use crate::api::error::AppError;
use crate::utils::timestamp;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GeminiQuery {
    /// Prompt forwarded verbatim to the model
    pub query: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct GeminiResponse {
    pub success: bool,
    pub query: String,
    pub response: String,
    pub timestamp: String,
}

const MISSING_QUERY_MESSAGE: &str = "Query parameter is required. Use ?query=your question";

#[utoipa::path(
    get,
    path = "/gemini",
    params(GeminiQuery),
    responses(
        (status = 200, description = "Generated answer", body = GeminiResponse),
        (status = 400, description = "Missing query parameter", body = crate::api::error::ErrorResponse),
        (status = 500, description = "API key not configured or upstream failure", body = crate::api::error::ErrorResponse)
    ),
    tag = "gemini"
)]
pub async fn query_gemini(
    State(state): State<AppState>,
    params: Result<Query<GeminiQuery>, QueryRejection>,
) -> Result<Json<GeminiResponse>, AppError> {
    let query = params
        .ok()
        .and_then(|Query(p)| p.query)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest(MISSING_QUERY_MESSAGE.to_string()))?;

    let generator = state.generator.as_ref().ok_or_else(|| {
        AppError::Configuration("GEMINI_API_KEY is not set in environment variables".to_string())
    })?;

    info!(prompt_len = query.len(), "Forwarding query to Gemini");
    let response = generator.generate(&query).await?;

    Ok(Json(GeminiResponse {
        success: true,
        query,
        response,
        timestamp: timestamp(),
    }))
}
