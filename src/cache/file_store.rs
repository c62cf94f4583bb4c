//! Caché en disco por namespace
//!
//! Cada namespace es un documento JSON autocontenido (clave -> entrada) que
//! se lee y reescribe completo en cada acceso. Las entradas expiradas no se
//! purgan en lectura: permanecen en disco hasta que un `put` con la misma
//! clave las sobrescriba (limitación conocida, no un bug).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Horas de validez de una entrada, fijas para todos los namespaces
pub const CACHE_EXPIRY_HOURS: i64 = 24;

/// Entrada individual dentro del documento de un namespace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: Value,
    pub timestamp: DateTime<Utc>,
}

/// Almacén TTL clave-valor respaldado por un documento JSON
pub struct FileCacheStore {
    namespace: String,
    path: PathBuf,
    ttl_hours: i64,
}

impl FileCacheStore {
    pub fn new(dir: &Path, namespace: &str, file_name: &str, ttl_hours: i64) -> Self {
        if let Err(e) = fs::create_dir_all(dir) {
            log::warn!("⚠️ No se pudo crear el directorio de caché {:?}: {}", dir, e);
        }
        Self {
            namespace: namespace.to_string(),
            path: dir.join(file_name),
            ttl_hours,
        }
    }

    /// Carga el documento del namespace; archivo faltante o corrupto se
    /// recupera como mapa vacío, nunca como error.
    fn load_document(&self) -> HashMap<String, CacheEntry> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                log::warn!(
                    "⚠️ Documento de caché '{}' ilegible, se usa vacío: {}",
                    self.namespace,
                    e
                );
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }

    /// Persiste el documento completo; una escritura fallida se registra y no
    /// se propaga, los llamadores siguen con el resultado en memoria.
    fn persist_document(&self, document: &HashMap<String, CacheEntry>) {
        let serialized = match serde_json::to_string_pretty(document) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("⚠️ No se pudo serializar el caché '{}': {}", self.namespace, e);
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, serialized) {
            log::warn!("⚠️ No se pudo guardar el caché '{}': {}", self.namespace, e);
        }
    }

    fn entrada_valida(&self, entry: &CacheEntry) -> bool {
        Utc::now() - entry.timestamp < Duration::hours(self.ttl_hours)
    }

    /// Devuelve el payload solo si la entrada existe y sigue vigente.
    pub fn get(&self, key: &str) -> Option<Value> {
        let document = self.load_document();
        match document.get(key) {
            Some(entry) if self.entrada_valida(entry) => {
                log::info!("✅ Caché '{}' vigente para: {}", self.namespace, key);
                Some(entry.data.clone())
            }
            Some(_) => {
                log::info!("⚠️ Caché '{}' expirado para: {}", self.namespace, key);
                None
            }
            None => {
                log::debug!("❌ Sin entrada en caché '{}' para: {}", self.namespace, key);
                None
            }
        }
    }

    /// Inserta o sobrescribe la entrada completa con timestamp actual.
    pub fn put(&self, key: &str, data: Value) {
        let mut document = self.load_document();
        document.insert(
            key.to_string(),
            CacheEntry {
                data,
                timestamp: Utc::now(),
            },
        );
        self.persist_document(&document);
        log::info!("💾 Guardado en caché '{}' para: {}", self.namespace, key);
    }
}

/// Los cinco namespaces del sistema, disjuntos entre sí.
///
/// Se construyen al arranque y se inyectan en el orquestador; no hay estado
/// de caché a nivel de módulo.
pub struct CacheStores {
    pub geocode: FileCacheStore,
    pub places: FileCacheStore,
    pub places_raw: FileCacheStore,
    pub reviews: FileCacheStore,
    pub reviews_raw: FileCacheStore,
}

impl CacheStores {
    pub fn new(dir: &Path) -> Self {
        Self {
            geocode: FileCacheStore::new(dir, "geocode", "geocode_cache.json", CACHE_EXPIRY_HOURS),
            places: FileCacheStore::new(dir, "places", "places_cache.json", CACHE_EXPIRY_HOURS),
            places_raw: FileCacheStore::new(
                dir,
                "places-raw",
                "places_raw_cache.json",
                CACHE_EXPIRY_HOURS,
            ),
            reviews: FileCacheStore::new(dir, "reviews", "reviews_cache.json", CACHE_EXPIRY_HOURS),
            reviews_raw: FileCacheStore::new(
                dir,
                "reviews-raw",
                "reviews_raw_cache.json",
                CACHE_EXPIRY_HOURS,
            ),
        }
    }
}
