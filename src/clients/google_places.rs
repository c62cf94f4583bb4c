//! Cliente para las APIs web de Google Maps (geocoding, Places Text Search,
//! Place Details)
//!
//! El cliente devuelve payloads crudos (`serde_json::Value`) para búsqueda y
//! detalles; el orquestador extrae solo los campos que alimentan la
//! clasificación y el análisis.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::models::place::Coordinates;

const BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Campos de detalles que alimentan el análisis de opiniones
const REVIEW_FIELDS: &str = "reviews,name,rating,user_ratings_total";

/// Proveedor upstream de geocodificación y búsqueda de lugares.
///
/// Las llamadas devuelven `Result`; el orquestador convierte cualquier `Err`
/// en el camino de respaldo, nunca lo propaga al llamador.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Geocodifica una dirección; `Ok(None)` cuando no hay resultados.
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>>;

    /// Búsqueda de lugares por texto alrededor de unas coordenadas.
    async fn text_search(
        &self,
        query: &str,
        location: &Coordinates,
        radius_m: u32,
    ) -> Result<Value>;

    /// Detalles de un lugar con sus reseñas.
    async fn place_details(&self, place_id: &str, language: &str) -> Result<Value>;

    /// Detalles completos de un lugar (todos los campos disponibles).
    async fn place_details_full(&self, place_id: &str) -> Result<Value>;
}

pub struct GooglePlacesClient {
    api_key: String,
    client: reqwest::Client,
}

impl GooglePlacesClient {
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { api_key, client }
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", "ExploradorTuristico/1.0")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Error HTTP {}: {}", status, error_text));
        }

        Ok(response.json().await?)
    }
}

fn api_status(payload: &Value) -> &str {
    payload
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>> {
        log::info!("🗺️ Geocodificando dirección: {}", address);

        let url = format!(
            "{}/geocode/json?address={}&key={}",
            BASE_URL,
            urlencoding::encode(address),
            self.api_key
        );
        let payload = self.get_json(&url).await?;

        let status = api_status(&payload);
        if status != "OK" && status != "ZERO_RESULTS" {
            return Err(anyhow!("Geocoding falló con status: {}", status));
        }

        let location = payload
            .get("results")
            .and_then(|results| results.get(0))
            .and_then(|result| result.get("geometry"))
            .and_then(|geometry| geometry.get("location"));

        match location {
            Some(location) => {
                let coords: Coordinates = serde_json::from_value(location.clone())?;
                log::info!(
                    "✅ Geocodificación exitosa: {} -> ({}, {})",
                    address,
                    coords.lat,
                    coords.lng
                );
                Ok(Some(coords))
            }
            None => {
                log::warn!("⚠️ Sin coordenadas para la dirección: {}", address);
                Ok(None)
            }
        }
    }

    async fn text_search(
        &self,
        query: &str,
        location: &Coordinates,
        radius_m: u32,
    ) -> Result<Value> {
        log::info!(
            "🔍 Text Search: '{}' en ({}, {}) radio {} m",
            query,
            location.lat,
            location.lng,
            radius_m
        );

        // La API limita el radio a 50 km
        let url = format!(
            "{}/place/textsearch/json?query={}&location={},{}&radius={}&key={}",
            BASE_URL,
            urlencoding::encode(query),
            location.lat,
            location.lng,
            radius_m.min(50_000),
            self.api_key
        );
        let payload = self.get_json(&url).await?;

        let status = api_status(&payload);
        if status != "OK" && status != "ZERO_RESULTS" {
            return Err(anyhow!("Text Search falló con status: {}", status));
        }

        Ok(payload)
    }

    async fn place_details(&self, place_id: &str, language: &str) -> Result<Value> {
        log::info!("🔍 Place Details para: {}", place_id);

        let url = format!(
            "{}/place/details/json?place_id={}&fields={}&language={}&key={}",
            BASE_URL,
            urlencoding::encode(place_id),
            REVIEW_FIELDS,
            urlencoding::encode(language),
            self.api_key
        );
        let payload = self.get_json(&url).await?;

        let status = api_status(&payload);
        if status != "OK" {
            return Err(anyhow!("Place Details falló con status: {}", status));
        }

        Ok(payload)
    }

    async fn place_details_full(&self, place_id: &str) -> Result<Value> {
        log::info!("🔍 Place Details (todos los campos) para: {}", place_id);

        // Sin máscara de campos la API devuelve todos los disponibles
        let url = format!(
            "{}/place/details/json?place_id={}&key={}",
            BASE_URL,
            urlencoding::encode(place_id),
            self.api_key
        );
        let payload = self.get_json(&url).await?;

        let status = api_status(&payload);
        if status != "OK" {
            return Err(anyhow!("Place Details falló con status: {}", status));
        }

        Ok(payload)
    }
}
