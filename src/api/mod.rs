//! API endpoints
//!
//! Este módulo contiene los endpoints de la API.

pub mod places;
pub mod reviews;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    let api = places::create_places_router().merge(reviews::create_reviews_router());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
}

/// Estado del servicio
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "explorador-turistico",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
