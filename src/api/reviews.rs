//! Endpoint de análisis de opiniones

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use validator::Validate;

use crate::models::opinion::OpinionAnalysis;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeReviewsRequest {
    #[validate(length(min = 1, message = "El place_id es requerido"))]
    pub place_id: String,
    #[serde(default = "default_idioma")]
    pub idioma: String,
}

fn default_idioma() -> String {
    "es".to_string()
}

pub fn create_reviews_router() -> Router<AppState> {
    Router::new().route("/reviews/analyze", post(analyze_reviews))
}

/// Endpoint de análisis de sentimientos, temas, fortalezas y debilidades.
///
/// Un lugar sin reseñas devuelve un resultado con `error` y
/// `total_reviews: 0`, no una falla.
pub async fn analyze_reviews(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeReviewsRequest>,
) -> Result<Json<OpinionAnalysis>, AppError> {
    log::info!(
        "📝 Análisis de opiniones solicitado para: {} ({})",
        request.place_id,
        request.idioma
    );
    request.validate()?;

    let analisis = state
        .lookup
        .analyze_reviews(&request.place_id, &request.idioma)
        .await;

    Ok(Json(analisis))
}
