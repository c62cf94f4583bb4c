//! Orquestador de búsquedas: caché primero, upstream después, respaldo siempre
//!
//! Cada operación sigue la misma máquina de estados: caché procesado (hit:
//! retornar), caché raw (hit: evitar la llamada upstream), fetch, análisis,
//! write-through de raw y procesado. Una falla upstream nunca llega al
//! llamador: se degrada al camino de respaldo con fuente `datos_placeholder`.

use anyhow::Result;
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::analysis::classifier::clasificar_lugares;
use crate::analysis::sentiment::{self, AnalyzerConfig};
use crate::cache::{cache_key, CacheStores};
use crate::clients::PlacesProvider;
use crate::models::opinion::{OpinionAnalysis, Review, SentimientoGeneral};
use crate::models::place::{ClassificationResult, Coordinates, Fuente, PlaceRecord};
use crate::services::fallback;

pub struct LookupService {
    stores: CacheStores,
    provider: Option<Arc<dyn PlacesProvider>>,
}

impl LookupService {
    pub fn new(stores: CacheStores, provider: Option<Arc<dyn PlacesProvider>>) -> Self {
        Self { stores, provider }
    }

    /// Mapeo de competencia y colaboradores para una búsqueda geolocalizada.
    ///
    /// Siempre devuelve un resultado con la forma completa de tres buckets;
    /// la fuente indica si vino de la API o del respaldo.
    pub async fn search_and_classify(
        &self,
        query: &str,
        ubicacion: &str,
        radio_km: u32,
    ) -> ClassificationResult {
        let Some(provider) = self.provider.as_deref() else {
            log::warn!("⚠️ GOOGLE_API_KEY no configurada, usando datos placeholder");
            return fallback::placeholder_search(query, ubicacion, radio_km);
        };

        let key = cache_key::places_key(query, ubicacion, radio_km);

        // 1. Caché procesado
        if let Some(cached) = self.stores.places.get(&key) {
            match serde_json::from_value::<ClassificationResult>(cached) {
                Ok(resultado) => {
                    log::info!(
                        "✅ Búsqueda servida desde caché para: '{}' en '{}'",
                        query,
                        ubicacion
                    );
                    return resultado;
                }
                Err(e) => log::warn!("⚠️ Entrada procesada ilegible, se recalcula: {}", e),
            }
        }

        // 2. Caché raw (evita geocodificación y búsqueda) o fetch upstream
        let (payload, coordenadas) = match self.stores.places_raw.get(&key) {
            Some(raw) => (raw, self.cached_coordinates(ubicacion)),
            None => {
                let coords = match self.resolve_location(provider, ubicacion).await {
                    Ok(Some(coords)) => coords,
                    Ok(None) => {
                        log::warn!(
                            "⚠️ No se pudo geocodificar '{}', usando datos placeholder",
                            ubicacion
                        );
                        return fallback::placeholder_search(query, ubicacion, radio_km);
                    }
                    Err(e) => {
                        log::error!("❌ Geocodificación falló para '{}': {}", ubicacion, e);
                        return fallback::placeholder_search(query, ubicacion, radio_km);
                    }
                };

                // La API usa metros
                let payload = match provider
                    .text_search(query, &coords, radio_km.saturating_mul(1000))
                    .await
                {
                    Ok(payload) => payload,
                    Err(e) => {
                        log::error!("❌ Búsqueda de lugares falló: {}", e);
                        return fallback::placeholder_search(query, ubicacion, radio_km);
                    }
                };

                self.stores.places_raw.put(&key, payload.clone());
                (payload, Some(coords))
            }
        };

        // 3. Formatear y clasificar
        let places = extract_places(&payload);
        if places.is_empty() {
            log::warn!(
                "⚠️ Sin resultados para '{}' en '{}', usando datos placeholder",
                query,
                ubicacion
            );
            return fallback::placeholder_search(query, ubicacion, radio_km);
        }
        log::info!(
            "✅ Encontrados {} lugares para '{}' en '{}'",
            places.len(),
            query,
            ubicacion
        );

        let total = places.len();
        let clasificacion = clasificar_lugares(places, query);
        let resultado = ClassificationResult {
            query: query.to_string(),
            ubicacion: ubicacion.to_string(),
            radio_km,
            total_encontrados: total,
            resumen: clasificacion.resumen(),
            clasificacion,
            fuente: Fuente::GooglePlacesApi,
            coordenadas_busqueda: coordenadas,
        };

        // 4. Write-through del resultado procesado
        match serde_json::to_value(&resultado) {
            Ok(value) => self.stores.places.put(&key, value),
            Err(e) => log::warn!("⚠️ No se pudo serializar el resultado para caché: {}", e),
        }

        resultado
    }

    /// Análisis de opiniones de un lugar por su identificador.
    pub async fn analyze_reviews(&self, place_id: &str, idioma: &str) -> OpinionAnalysis {
        let Some(provider) = self.provider.as_deref() else {
            log::warn!(
                "⚠️ GOOGLE_API_KEY no configurada, usando datos placeholder para reseñas"
            );
            return fallback::placeholder_opinions(place_id);
        };

        // 1. Caché procesado: el place_id es la clave en ambos namespaces
        if let Some(cached) = self.stores.reviews.get(place_id) {
            match serde_json::from_value::<OpinionAnalysis>(cached) {
                Ok(resultado) => {
                    log::info!("✅ Análisis servido desde caché para: {}", place_id);
                    return resultado;
                }
                Err(e) => log::warn!("⚠️ Análisis cacheado ilegible, se recalcula: {}", e),
            }
        }

        // 2. Caché raw o fetch de detalles
        let details = match self.stores.reviews_raw.get(place_id) {
            Some(raw) => raw,
            None => match provider.place_details(place_id, idioma).await {
                Ok(payload) => {
                    self.stores.reviews_raw.put(place_id, payload.clone());
                    payload
                }
                Err(e) => {
                    log::error!("❌ Detalles fallaron para {}: {}", place_id, e);
                    return fallback::placeholder_opinions(place_id);
                }
            },
        };

        let Some(place_data) = details.get("result") else {
            log::warn!(
                "⚠️ Sin detalles para place_id {}, usando datos placeholder",
                place_id
            );
            return fallback::placeholder_opinions(place_id);
        };

        // 3. Extraer reseñas; un lugar sin reseñas produce un resultado con
        // error explícito que también se cachea
        let reviews = extract_reviews(place_data);
        if reviews.is_empty() {
            let resultado = fallback::sin_resenas(place_id, Fuente::GooglePlacesApi);
            self.cache_opinion(place_id, &resultado);
            return resultado;
        }
        log::info!(
            "✅ Encontradas {} reseñas para place_id: {}",
            reviews.len(),
            place_id
        );

        // 4. Analizar y armar el resultado
        let resumen = sentiment::analyze(&reviews, &AnalyzerConfig::live());
        let resultado = OpinionAnalysis {
            place_id: place_id.to_string(),
            idioma: Some(idioma.to_string()),
            nombre_lugar: place_data
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string),
            total_reviews: reviews.len(),
            total_ratings: place_data.get("user_ratings_total").and_then(Value::as_u64),
            rating_promedio: place_data.get("rating").and_then(Value::as_f64),
            sentimiento_general: Some(SentimientoGeneral {
                distribucion: resumen.distribucion,
                predominante: resumen.predominante,
            }),
            temas_principales: Some(resumen.temas_principales),
            fortalezas: Some(resumen.fortalezas),
            debilidades: Some(resumen.debilidades),
            insights: Some(resumen.insights),
            fuente: Fuente::GooglePlacesApi,
            fecha_analisis: Some(Utc::now().to_rfc3339()),
            error: None,
        };

        self.cache_opinion(place_id, &resultado);
        resultado
    }

    /// Detalles completos de un lugar como payload estructurado. Los errores
    /// se devuelven como objeto con campo `error`, nunca como falla.
    pub async fn place_details(&self, place_id: &str) -> Value {
        let Some(provider) = self.provider.as_deref() else {
            return json!({
                "place_id": place_id,
                "error": "GOOGLE_API_KEY no configurada",
                "fuente": "configuracion",
            });
        };

        let payload = match provider.place_details_full(place_id).await {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("❌ Detalles completos fallaron para {}: {}", place_id, e);
                return json!({
                    "place_id": place_id,
                    "error": e.to_string(),
                    "fuente": "google_places_api",
                });
            }
        };

        let Some(data) = payload.get("result") else {
            return json!({
                "place_id": place_id,
                "error": "Sin detalles disponibles para este lugar",
                "fuente": "google_places_api",
            });
        };

        json!({
            "place_id": place_id,
            "status": "success",
            "fuente": "google_places_api",
            "timestamp": Utc::now().to_rfc3339(),
            "informacion_basica": {
                "nombre": data.get("name"),
                "direccion": data.get("formatted_address"),
                "telefono_internacional": data.get("international_phone_number"),
                "website": data.get("website"),
                "google_maps_uri": data.get("url"),
            },
            "ratings": {
                "rating_promedio": data.get("rating"),
                "total_reviews": data.get("user_ratings_total"),
                "nivel_precio": data.get("price_level"),
            },
            "categoria": {
                "tipos": data.get("types"),
                "estado_negocio": data.get("business_status"),
            },
            "ubicacion": {
                "coordenadas": data.get("geometry").and_then(|g| g.get("location")),
            },
            "metadatos": {
                "total_campos_disponibles": data.as_object().map(|o| o.len()).unwrap_or(0),
                "tiene_fotos": data.get("photos").is_some(),
                "tiene_reviews": data.get("reviews").is_some(),
            },
            "datos_completos": data,
        })
    }

    fn cached_coordinates(&self, ubicacion: &str) -> Option<Coordinates> {
        self.stores
            .geocode
            .get(&cache_key::geocode_key(ubicacion))
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Geocodifica con caché: hit evita la llamada, miss escribe el resultado.
    async fn resolve_location(
        &self,
        provider: &dyn PlacesProvider,
        ubicacion: &str,
    ) -> Result<Option<Coordinates>> {
        if let Some(coords) = self.cached_coordinates(ubicacion) {
            return Ok(Some(coords));
        }

        let resolved = provider.geocode(ubicacion).await?;
        if let Some(coords) = resolved {
            self.stores
                .geocode
                .put(&cache_key::geocode_key(ubicacion), serde_json::to_value(coords)?);
        }
        Ok(resolved)
    }

    fn cache_opinion(&self, place_id: &str, resultado: &OpinionAnalysis) {
        match serde_json::to_value(resultado) {
            Ok(value) => self.stores.reviews.put(place_id, value),
            Err(e) => log::warn!("⚠️ No se pudo serializar el análisis para caché: {}", e),
        }
    }
}

/// Formatea los lugares del payload crudo de Text Search.
fn extract_places(payload: &Value) -> Vec<PlaceRecord> {
    let Some(results) = payload.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    results
        .iter()
        .map(|place| PlaceRecord {
            place_id: place
                .get("place_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            name: place
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("Nombre no disponible")
                .to_string(),
            address: place
                .get("vicinity")
                .and_then(Value::as_str)
                .or_else(|| place.get("formatted_address").and_then(Value::as_str))
                .unwrap_or("Dirección no disponible")
                .to_string(),
            // El website requiere Place Details, no viene en la búsqueda
            website: None,
            rating: place.get("rating").and_then(Value::as_f64),
            user_ratings_total: place.get("user_ratings_total").and_then(Value::as_u64),
            types: place
                .get("types")
                .and_then(Value::as_array)
                .map(|types| {
                    types
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            category: None,
        })
        .collect()
}

/// Extrae las reseñas del nodo `result` de Place Details. Entradas con campos
/// faltantes se rellenan con valores neutros; entradas malformadas se omiten.
fn extract_reviews(place_data: &Value) -> Vec<Review> {
    place_data
        .get("reviews")
        .and_then(Value::as_array)
        .map(|reviews| {
            reviews
                .iter()
                .filter_map(|review| serde_json::from_value(review.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Proveedor que falla en todas las llamadas
    struct FailingProvider;

    #[async_trait]
    impl PlacesProvider for FailingProvider {
        async fn geocode(&self, _address: &str) -> Result<Option<Coordinates>> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn text_search(
            &self,
            _query: &str,
            _location: &Coordinates,
            _radius_m: u32,
        ) -> Result<Value> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn place_details(&self, _place_id: &str, _language: &str) -> Result<Value> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn place_details_full(&self, _place_id: &str) -> Result<Value> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    /// Proveedor con respuestas fijas que cuenta las llamadas de búsqueda
    struct MockProvider {
        search_calls: AtomicUsize,
        details_calls: AtomicUsize,
        details_payload: Value,
    }

    impl MockProvider {
        fn new(details_payload: Value) -> Self {
            Self {
                search_calls: AtomicUsize::new(0),
                details_calls: AtomicUsize::new(0),
                details_payload,
            }
        }
    }

    #[async_trait]
    impl PlacesProvider for MockProvider {
        async fn geocode(&self, _address: &str) -> Result<Option<Coordinates>> {
            Ok(Some(Coordinates {
                lat: -29.9773,
                lng: -70.7253,
            }))
        }

        async fn text_search(
            &self,
            _query: &str,
            _location: &Coordinates,
            _radius_m: u32,
        ) -> Result<Value> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({
                "status": "OK",
                "results": [
                    {
                        "place_id": "ChIJ_obs",
                        "name": "Observatorio del Pangue",
                        "formatted_address": "Camino al Pangue, Vicuña",
                        "rating": 4.8,
                        "user_ratings_total": 321,
                        "types": ["tourist_attraction", "point_of_interest"],
                    },
                    {
                        "place_id": "ChIJ_hotel",
                        "name": "Hostal Elqui",
                        "vicinity": "Vicuña",
                        "rating": 4.1,
                        "types": ["lodging"],
                    },
                ],
            }))
        }

        async fn place_details(&self, _place_id: &str, _language: &str) -> Result<Value> {
            self.details_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.details_payload.clone())
        }

        async fn place_details_full(&self, _place_id: &str) -> Result<Value> {
            Ok(self.details_payload.clone())
        }
    }

    fn service_with(provider: Option<Arc<dyn PlacesProvider>>) -> (LookupService, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let stores = CacheStores::new(dir.path());
        (LookupService::new(stores, provider), dir)
    }

    #[tokio::test]
    async fn sin_api_key_la_busqueda_degrada_a_placeholder() {
        let (service, _dir) = service_with(None);
        let resultado = service
            .search_and_classify("tour astronómico", "Valle del Elqui", 50)
            .await;

        assert_eq!(resultado.fuente, Fuente::DatosPlaceholder);
        assert_eq!(resultado.clasificacion.total(), resultado.total_encontrados);
    }

    #[tokio::test]
    async fn una_falla_upstream_degrada_a_placeholder_con_forma_completa() {
        let (service, _dir) = service_with(Some(Arc::new(FailingProvider)));
        let resultado = service
            .search_and_classify("cabalgatas", "Valle del Elqui", 25)
            .await;

        assert_eq!(resultado.fuente, Fuente::DatosPlaceholder);
        assert_eq!(resultado.total_encontrados, 1);
        assert_eq!(
            resultado.resumen.competencia_directa
                + resultado.resumen.competencia_indirecta
                + resultado.resumen.colaboradores_potenciales,
            resultado.total_encontrados
        );
    }

    #[tokio::test]
    async fn la_segunda_busqueda_se_sirve_del_cache_procesado() {
        let provider = Arc::new(MockProvider::new(json!({})));
        let dir = tempfile::tempdir().unwrap();
        let service = LookupService::new(
            CacheStores::new(dir.path()),
            Some(provider.clone() as Arc<dyn PlacesProvider>),
        );

        let primero = service
            .search_and_classify("tour astronómico", "Valle del Elqui", 50)
            .await;
        let segundo = service
            .search_and_classify("tour astronómico", "Valle del Elqui", 50)
            .await;

        assert_eq!(provider.search_calls.load(Ordering::SeqCst), 1);
        assert_eq!(primero.fuente, Fuente::GooglePlacesApi);
        assert_eq!(segundo.fuente, Fuente::GooglePlacesApi);
        assert_eq!(segundo.total_encontrados, 2);
        assert_eq!(segundo.resumen.competencia_directa, 1);
        assert_eq!(segundo.resumen.colaboradores_potenciales, 1);
        assert_eq!(
            segundo.coordenadas_busqueda.map(|c| c.lat),
            Some(-29.9773)
        );
    }

    #[tokio::test]
    async fn los_detalles_sin_resenas_producen_error_estructurado() {
        let provider = Arc::new(MockProvider::new(json!({
            "status": "OK",
            "result": {"name": "Observatorio del Pangue", "rating": 4.8},
        })));
        let dir = tempfile::tempdir().unwrap();
        let service = LookupService::new(
            CacheStores::new(dir.path()),
            Some(provider as Arc<dyn PlacesProvider>),
        );

        let analisis = service.analyze_reviews("ChIJ_obs", "es").await;

        assert_eq!(analisis.total_reviews, 0);
        assert!(analisis.error.as_ref().is_some_and(|e| !e.is_empty()));
        assert_eq!(analisis.fuente, Fuente::GooglePlacesApi);
    }

    #[tokio::test]
    async fn el_analisis_en_vivo_se_cachea_y_no_repite_la_llamada() {
        let provider = Arc::new(MockProvider::new(json!({
            "status": "OK",
            "result": {
                "name": "Observatorio del Pangue",
                "rating": 4.8,
                "user_ratings_total": 321,
                "reviews": [
                    {
                        "author_name": "María González",
                        "rating": 5,
                        "text": "Experiencia excelente, muy recomiendo",
                        "time": 1723710000,
                    },
                    {
                        "author_name": "Pedro Silva",
                        "rating": 2,
                        "text": "Demasiado caro para lo que ofrecen",
                        "time": 1715990400,
                    },
                ],
            },
        })));
        let dir = tempfile::tempdir().unwrap();
        let service = LookupService::new(
            CacheStores::new(dir.path()),
            Some(provider.clone() as Arc<dyn PlacesProvider>),
        );

        let primero = service.analyze_reviews("ChIJ_obs", "es").await;
        let segundo = service.analyze_reviews("ChIJ_obs", "es").await;

        assert_eq!(provider.details_calls.load(Ordering::SeqCst), 1);
        assert_eq!(primero.total_reviews, 2);
        assert_eq!(primero.nombre_lugar.as_deref(), Some("Observatorio del Pangue"));
        assert_eq!(primero.rating_promedio, Some(4.8));
        assert_eq!(primero.total_ratings, Some(321));
        let sentimiento = primero.sentimiento_general.unwrap();
        assert_eq!(sentimiento.distribucion.total(), 2);
        assert_eq!(
            primero.fortalezas.as_ref().unwrap()[0].frase,
            "Experiencia excelente, muy recomiendo"
        );
        assert_eq!(segundo.total_reviews, 2);
        assert_eq!(segundo.fecha_analisis, primero.fecha_analisis);
    }

    #[tokio::test]
    async fn una_falla_de_detalles_degrada_a_placeholder() {
        let (service, _dir) = service_with(Some(Arc::new(FailingProvider)));
        let analisis = service
            .analyze_reviews(fallback::PLACEHOLDER_PLACE_ID, "es")
            .await;

        assert_eq!(analisis.fuente, Fuente::DatosPlaceholder);
        assert_eq!(analisis.total_reviews, 4);
    }

    #[tokio::test]
    async fn los_detalles_estructurados_reportan_error_sin_api_key() {
        let (service, _dir) = service_with(None);
        let detalles = service.place_details("ChIJ_obs").await;

        assert_eq!(
            detalles.get("error").and_then(Value::as_str),
            Some("GOOGLE_API_KEY no configurada")
        );
        assert_eq!(
            detalles.get("fuente").and_then(Value::as_str),
            Some("configuracion")
        );
    }
}
