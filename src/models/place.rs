//! Modelos de lugares y clasificación de competencia

use serde::{Deserialize, Serialize};

/// Categoría asignada a un lugar durante la clasificación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    CompetenciaDirecta,
    CompetenciaIndirecta,
    ColaboradoresPotenciales,
}

/// Origen de los datos de un resultado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fuente {
    GooglePlacesApi,
    DatosPlaceholder,
}

/// Coordenadas geográficas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Lugar formateado desde la respuesta de la API de lugares
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub place_id: String,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u64>,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<PlaceCategory>,
}

/// Lugares agrupados por categoría (orden de llegada preservado)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clasificacion {
    pub competencia_directa: Vec<PlaceRecord>,
    pub competencia_indirecta: Vec<PlaceRecord>,
    pub colaboradores_potenciales: Vec<PlaceRecord>,
}

impl Clasificacion {
    pub fn resumen(&self) -> ResumenClasificacion {
        ResumenClasificacion {
            competencia_directa: self.competencia_directa.len(),
            competencia_indirecta: self.competencia_indirecta.len(),
            colaboradores_potenciales: self.colaboradores_potenciales.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.competencia_directa.len()
            + self.competencia_indirecta.len()
            + self.colaboradores_potenciales.len()
    }
}

/// Conteo de lugares por categoría
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumenClasificacion {
    pub competencia_directa: usize,
    pub competencia_indirecta: usize,
    pub colaboradores_potenciales: usize,
}

/// Resultado del mapeo de competencia y colaboradores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub query: String,
    pub ubicacion: String,
    pub radio_km: u32,
    pub total_encontrados: usize,
    pub clasificacion: Clasificacion,
    pub resumen: ResumenClasificacion,
    pub fuente: Fuente,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordenadas_busqueda: Option<Coordinates>,
}
