//! Vocabularios fijos del análisis
//!
//! Las listas viven en un solo lugar para que la clasificación y el análisis
//! de sentimiento usen exactamente los mismos términos en todos los puntos de
//! llamada.

use lazy_static::lazy_static;

lazy_static! {
    /// Tipos de lugar que compiten por el mismo visitante
    pub static ref TIPOS_COMPETENCIA: Vec<&'static str> =
        vec!["tourist_attraction", "travel_agency", "point_of_interest"];

    /// Tipos de lugar que forman la cadena de valor (alojamiento, comida, retail)
    pub static ref TIPOS_COLABORADOR: Vec<&'static str> =
        vec!["lodging", "hotel", "restaurant", "food", "bar", "store", "winery"];

    /// Palabras en el nombre que marcan competencia directa
    pub static ref KEYWORDS_COMPETENCIA_DIRECTA: Vec<&'static str> =
        vec!["observatorio", "astronomic", "astro", "tour", "observatory"];

    /// Palabras que suman al sentimiento positivo
    pub static ref PALABRAS_POSITIVAS: Vec<&'static str> = vec![
        "excelente",
        "increíble",
        "perfecto",
        "bueno",
        "recomiendo",
        "fascinante",
        "vale la pena",
    ];

    /// Palabras que suman al sentimiento negativo
    pub static ref PALABRAS_NEGATIVAS: Vec<&'static str> =
        vec!["malo", "terrible", "caro", "frío", "elevado", "esperaba más"];

    /// Vocabulario de temas; el orden de declaración es el desempate del ranking
    pub static ref TEMAS: Vec<&'static str> = vec![
        "guía",
        "precio",
        "niños",
        "frío",
        "equipo",
        "telescopio",
        "experiencia",
        "familia",
        "caro",
        "profesional",
        "didáctico",
        "conocedor",
        "servicio",
        "limpio",
        "sucio",
        "rápido",
        "lento",
        "amable",
        "grosero",
        "recomendado",
        "no recomendado",
    ];

    /// Frases que habilitan un extracto de fortaleza (con rating >= 4)
    pub static ref INDICADORES_FORTALEZA: Vec<&'static str> = vec![
        "excelente",
        "increíble",
        "perfecto",
        "genial",
        "fantástico",
        "recomiendo",
    ];

    /// Frases que habilitan un extracto de debilidad (con rating <= 3)
    pub static ref INDICADORES_DEBILIDAD: Vec<&'static str> = vec![
        "caro",
        "elevado",
        "malo",
        "terrible",
        "no recomiendo",
        "esperaba más",
        "decepcionante",
    ];

    /// Palabras que atribuyen una debilidad al aspecto precio/expectativas
    pub static ref PALABRAS_PRECIO: Vec<&'static str> = vec!["caro", "elevado", "precio"];
}
