//! Modelos de reseñas y análisis de opiniones

use serde::{Deserialize, Serialize};

use crate::models::place::Fuente;

/// Reseña de un lugar tal como llega del proveedor upstream.
///
/// Los campos faltantes se rellenan con valores neutros: una reseña sin texto
/// no aporta señal a ningún conteo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(default = "autor_anonimo")]
    pub author_name: String,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<serde_json::Value>,
}

fn autor_anonimo() -> String {
    "Usuario anónimo".to_string()
}

/// Sentimiento detectado en una reseña
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentimiento {
    Positivo,
    Negativo,
    Neutro,
}

/// Distribución de sentimientos sobre un conjunto de reseñas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistribucionSentimiento {
    pub positivo: usize,
    pub negativo: usize,
    pub neutro: usize,
}

impl DistribucionSentimiento {
    pub fn registrar(&mut self, sentimiento: Sentimiento) {
        match sentimiento {
            Sentimiento::Positivo => self.positivo += 1,
            Sentimiento::Negativo => self.negativo += 1,
            Sentimiento::Neutro => self.neutro += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positivo + self.negativo + self.neutro
    }

    /// Sentimiento con más reseñas; empates resueltos por el orden fijo
    /// positivo, negativo, neutro.
    pub fn predominante(&self) -> Sentimiento {
        let mut predominante = Sentimiento::Positivo;
        let mut maximo = self.positivo;
        if self.negativo > maximo {
            predominante = Sentimiento::Negativo;
            maximo = self.negativo;
        }
        if self.neutro > maximo {
            predominante = Sentimiento::Neutro;
        }
        predominante
    }
}

/// Sentimiento agregado del lugar
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SentimientoGeneral {
    pub distribucion: DistribucionSentimiento,
    pub predominante: Sentimiento,
}

/// Tema recurrente con el número de reseñas que lo mencionan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemaMencion {
    pub tema: String,
    pub menciones: usize,
}

/// Aspecto al que se atribuye un fragmento destacado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspecto {
    ExperienciaGeneral,
    PrecioExpectativas,
}

/// Fragmento destacado de una reseña (fortaleza o debilidad)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragmento {
    pub frase: String,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autor: Option<String>,
    pub aspecto: Aspecto,
}

/// Señales booleanas derivadas de los conteos de temas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    pub precio_mencionado: bool,
    pub apto_familias: bool,
    pub calidad_servicio: bool,
    pub calidad_guia: bool,
    pub calidad_equipo: bool,
    pub limpieza_mencionada: bool,
    pub velocidad_servicio: bool,
}

/// Resultado del análisis de opiniones de un lugar.
///
/// Un lugar sin reseñas produce un resultado con `error` y `total_reviews: 0`
/// en lugar de un reporte degenerado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpinionAnalysis {
    pub place_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idioma: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_lugar: Option<String>,
    pub total_reviews: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_ratings: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_promedio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentimiento_general: Option<SentimientoGeneral>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temas_principales: Option<Vec<TemaMencion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fortalezas: Option<Vec<Fragmento>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debilidades: Option<Vec<Fragmento>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Insights>,
    pub fuente: Fuente,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_analisis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predominante_prefiere_positivo_en_empate() {
        let distribucion = DistribucionSentimiento {
            positivo: 2,
            negativo: 2,
            neutro: 1,
        };
        assert_eq!(distribucion.predominante(), Sentimiento::Positivo);
    }

    #[test]
    fn predominante_prefiere_negativo_sobre_neutro_en_empate() {
        let distribucion = DistribucionSentimiento {
            positivo: 0,
            negativo: 3,
            neutro: 3,
        };
        assert_eq!(distribucion.predominante(), Sentimiento::Negativo);
    }

    #[test]
    fn review_sin_campos_usa_valores_neutros() {
        let review: Review = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(review.author_name, "Usuario anónimo");
        assert_eq!(review.rating, 0);
        assert!(review.text.is_empty());
    }
}
