//! Camino de respaldo cuando la API upstream no está disponible
//!
//! Cualquier falla upstream (clave ausente, error de red, geocodificación
//! fallida, resultados vacíos) termina aquí: se sintetiza un resultado
//! mínimo etiquetado con fuente `datos_placeholder` en lugar de propagar el
//! error al llamador.

use serde_json::json;

use crate::analysis::classifier::clasificar_lugares;
use crate::analysis::sentiment::{self, AnalyzerConfig};
use crate::models::opinion::{OpinionAnalysis, Review, SentimientoGeneral};
use crate::models::place::{ClassificationResult, Fuente, PlaceRecord};

/// Query con dataset placeholder completo
pub const PLACEHOLDER_QUERY: &str = "tour astronómico";
/// Lugar con reseñas placeholder
pub const PLACEHOLDER_PLACE_ID: &str = "ChIJ123_astro_tour_elqui";

const ERROR_SIN_RESENAS: &str = "No se encontraron reseñas para este lugar";

fn lugar(
    place_id: &str,
    name: &str,
    address: &str,
    website: &str,
    rating: f64,
    types: &[&str],
) -> PlaceRecord {
    PlaceRecord {
        place_id: place_id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        website: Some(website.to_string()),
        rating: Some(rating),
        user_ratings_total: None,
        types: types.iter().map(|t| t.to_string()).collect(),
        category: None,
    }
}

fn placeholder_places() -> Vec<PlaceRecord> {
    vec![
        lugar(
            "ChIJ123_astro_tour_elqui",
            "Observatorio Cerro Mayu",
            "Ruta 41, Vicuña, Valle del Elqui",
            "https://cerromayu.cl",
            4.5,
            &["tourist_attraction", "night_club"],
        ),
        lugar(
            "ChIJ456_astro_center",
            "Centro Astronómico Andino",
            "Camino El Pangue, Pisco Elqui",
            "https://astroandino.cl",
            4.3,
            &["tourist_attraction", "establishment"],
        ),
        lugar(
            "ChIJ789_museum_gabriela",
            "Museo Gabriela Mistral",
            "Gabriela Mistral 759, Vicuña",
            "https://museogabrielamistral.cl",
            4.2,
            &["museum", "tourist_attraction"],
        ),
        lugar(
            "ChIJ101_hotel_elqui",
            "Hotel Valle del Elqui",
            "Av. Bernardo O'Higgins 542, Vicuña",
            "https://hotelvalleelqui.cl",
            4.0,
            &["lodging", "establishment"],
        ),
        lugar(
            "ChIJ202_restaurant_solar",
            "Restaurant Solar de Baviera",
            "Av. Bernardo O'Higgins 274, Vicuña",
            "https://solardebaviera.cl",
            4.4,
            &["restaurant", "food"],
        ),
    ]
}

fn placeholder_reviews() -> Vec<Review> {
    let datos = [
        (
            "María González",
            5,
            "Increíble experiencia astronómica. El guía fue muy conocedor y el equipo \
             excelente. Vale la pena el viaje al Valle del Elqui solo por esto.",
            "2024-08-15",
        ),
        (
            "Carlos Rojas",
            4,
            "Muy buena actividad, aunque un poco cara. Los telescopios son profesionales \
             y se aprende mucho. Llevar ropa abrigada porque hace frío en la noche.",
            "2024-07-22",
        ),
        (
            "Ana Pérez",
            5,
            "Perfecto para ir en familia. Los niños quedaron fascinados viendo Saturno y \
             Júpiter. El guía explicó todo de manera muy didáctica.",
            "2024-06-10",
        ),
        (
            "Pedro Silva",
            3,
            "La experiencia estuvo bien, pero esperaba ver más cosas. El precio me \
             pareció un poco elevado para lo que ofrecen. El equipo sí es bueno.",
            "2024-05-18",
        ),
    ];

    datos
        .iter()
        .map(|(author, rating, text, time)| Review {
            author_name: author.to_string(),
            rating: *rating,
            text: text.to_string(),
            time: Some(json!(time)),
        })
        .collect()
}

/// Lugar sintetizado para queries sin dataset placeholder. El sufijo md5 hace
/// el identificador determinista para la misma entrada.
fn lugar_sintetizado(query: &str, ubicacion: &str) -> PlaceRecord {
    let digest = format!("{:x}", md5::compute(format!("{}{}", query, ubicacion)));
    PlaceRecord {
        place_id: format!("placeholder_{}", &digest[..8]),
        name: format!("Negocio relacionado con {}", query),
        address: format!("Dirección en {}", ubicacion),
        website: Some("https://ejemplo.cl".to_string()),
        rating: Some(4.0),
        user_ratings_total: None,
        types: vec!["establishment".to_string()],
        category: None,
    }
}

/// Resultado de búsqueda con datos placeholder, con la misma forma de tres
/// buckets que un resultado en vivo.
pub fn placeholder_search(query: &str, ubicacion: &str, radio_km: u32) -> ClassificationResult {
    log::warn!(
        "⚠️ Usando datos placeholder para búsqueda: '{}' en '{}'",
        query,
        ubicacion
    );

    let places = if query.to_lowercase() == PLACEHOLDER_QUERY {
        placeholder_places()
    } else {
        vec![lugar_sintetizado(query, ubicacion)]
    };

    let total = places.len();
    let clasificacion = clasificar_lugares(places, query);

    ClassificationResult {
        query: query.to_string(),
        ubicacion: ubicacion.to_string(),
        radio_km,
        total_encontrados: total,
        resumen: clasificacion.resumen(),
        clasificacion,
        fuente: Fuente::DatosPlaceholder,
        coordenadas_busqueda: None,
    }
}

/// Análisis de opiniones con datos placeholder.
pub fn placeholder_opinions(place_id: &str) -> OpinionAnalysis {
    log::warn!("⚠️ Usando datos placeholder para reseñas de: {}", place_id);

    if place_id != PLACEHOLDER_PLACE_ID {
        return sin_resenas(place_id, Fuente::DatosPlaceholder);
    }

    let reviews = placeholder_reviews();
    let resumen = sentiment::analyze(&reviews, &AnalyzerConfig::placeholder());
    let promedio =
        reviews.iter().map(|r| r.rating as f64).sum::<f64>() / reviews.len() as f64;

    OpinionAnalysis {
        place_id: place_id.to_string(),
        idioma: Some("es".to_string()),
        nombre_lugar: None,
        total_reviews: reviews.len(),
        total_ratings: None,
        rating_promedio: Some((promedio * 10.0).round() / 10.0),
        sentimiento_general: Some(SentimientoGeneral {
            distribucion: resumen.distribucion,
            predominante: resumen.predominante,
        }),
        temas_principales: Some(resumen.temas_principales),
        fortalezas: Some(resumen.fortalezas),
        debilidades: Some(resumen.debilidades),
        insights: Some(resumen.insights),
        fuente: Fuente::DatosPlaceholder,
        fecha_analisis: None,
        error: None,
    }
}

/// Resultado para un lugar sin reseñas: error explícito, nunca un reporte
/// degenerado ni una falla.
pub fn sin_resenas(place_id: &str, fuente: Fuente) -> OpinionAnalysis {
    OpinionAnalysis {
        place_id: place_id.to_string(),
        idioma: None,
        nombre_lugar: None,
        total_reviews: 0,
        total_ratings: None,
        rating_promedio: None,
        sentimiento_general: None,
        temas_principales: None,
        fortalezas: None,
        debilidades: None,
        insights: None,
        fuente,
        fecha_analisis: None,
        error: Some(ERROR_SIN_RESENAS.to_string()),
    }
}
