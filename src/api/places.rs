//! Endpoints de mapeo de competencia y detalles de lugares

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use validator::Validate;

use crate::models::place::ClassificationResult;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize, Validate)]
pub struct SearchPlacesRequest {
    #[validate(length(min = 1, message = "La consulta es requerida"))]
    pub query: String,
    #[validate(length(min = 1, message = "La ubicación es requerida"))]
    pub ubicacion: String,
    #[serde(default = "default_radio_km")]
    #[validate(range(min = 1, max = 50, message = "El radio debe estar entre 1 y 50 km"))]
    pub radio_km: u32,
}

fn default_radio_km() -> u32 {
    50
}

#[derive(Debug, Deserialize, Validate)]
pub struct PlaceDetailsRequest {
    #[validate(length(min = 1, message = "El place_id es requerido"))]
    pub place_id: String,
}

pub fn create_places_router() -> Router<AppState> {
    Router::new()
        .route("/places/search", post(search_places))
        .route("/places/details", post(place_details))
}

/// Endpoint de mapeo de competencia y colaboradores.
///
/// Pasada la validación, la respuesta es siempre un resultado estructurado;
/// las fallas upstream se degradan al camino de respaldo dentro del servicio.
pub async fn search_places(
    State(state): State<AppState>,
    Json(request): Json<SearchPlacesRequest>,
) -> Result<Json<ClassificationResult>, AppError> {
    log::info!(
        "🔍 Búsqueda recibida: '{}' en '{}' ({} km)",
        request.query,
        request.ubicacion,
        request.radio_km
    );
    request.validate()?;

    let resultado = state
        .lookup
        .search_and_classify(&request.query, &request.ubicacion, request.radio_km)
        .await;

    Ok(Json(resultado))
}

/// Endpoint de detalles completos de un lugar
pub async fn place_details(
    State(state): State<AppState>,
    Json(request): Json<PlaceDetailsRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    log::info!("🔍 Detalles solicitados para: {}", request.place_id);
    request.validate()?;

    let detalles = state.lookup.place_details(&request.place_id).await;
    Ok(Json(detalles))
}
