//! Clasificación de lugares en competencia directa, indirecta y colaboradores

use crate::analysis::keywords;
use crate::models::place::{Clasificacion, PlaceCategory, PlaceRecord};

/// Clasifica lugares en categorías para análisis de competencia.
///
/// Una sola pasada en el orden de llegada, gana la primera regla que aplique.
/// Ningún lugar se descarta ni se duplica: la unión de los tres buckets es
/// exactamente la lista de entrada.
pub fn clasificar_lugares(places: Vec<PlaceRecord>, query: &str) -> Clasificacion {
    let mut clasificados = Clasificacion::default();
    let query_keywords: Vec<String> = query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    for mut place in places {
        let name_lower = place.name.to_lowercase();

        let category = if tiene_tipo(&place, &keywords::TIPOS_COMPETENCIA) {
            let nombre_competidor = keywords::KEYWORDS_COMPETENCIA_DIRECTA
                .iter()
                .any(|keyword| name_lower.contains(keyword))
                || query_keywords
                    .iter()
                    .any(|palabra| name_lower.contains(palabra.as_str()));

            if nombre_competidor {
                PlaceCategory::CompetenciaDirecta
            } else {
                PlaceCategory::CompetenciaIndirecta
            }
        } else if tiene_tipo(&place, &keywords::TIPOS_COLABORADOR) {
            PlaceCategory::ColaboradoresPotenciales
        } else {
            PlaceCategory::CompetenciaIndirecta
        };

        place.category = Some(category);
        match category {
            PlaceCategory::CompetenciaDirecta => clasificados.competencia_directa.push(place),
            PlaceCategory::CompetenciaIndirecta => clasificados.competencia_indirecta.push(place),
            PlaceCategory::ColaboradoresPotenciales => {
                clasificados.colaboradores_potenciales.push(place)
            }
        }
    }

    clasificados
}

fn tiene_tipo(place: &PlaceRecord, tipos: &[&str]) -> bool {
    place.types.iter().any(|t| tipos.contains(&t.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lugar(place_id: &str, name: &str, types: &[&str]) -> PlaceRecord {
        PlaceRecord {
            place_id: place_id.to_string(),
            name: name.to_string(),
            address: "Ruta 41, Vicuña".to_string(),
            website: None,
            rating: Some(4.2),
            user_ratings_total: None,
            types: types.iter().map(|t| t.to_string()).collect(),
            category: None,
        }
    }

    #[test]
    fn atraccion_con_nombre_de_observatorio_es_competencia_directa() {
        let lugares = vec![
            lugar("p1", "Hotel Valle", &["lodging"]),
            lugar("p2", "Observatorio X", &["tourist_attraction"]),
        ];

        let clasificados = clasificar_lugares(lugares, "tour");

        assert_eq!(clasificados.colaboradores_potenciales.len(), 1);
        assert_eq!(clasificados.colaboradores_potenciales[0].place_id, "p1");
        assert_eq!(
            clasificados.colaboradores_potenciales[0].category,
            Some(PlaceCategory::ColaboradoresPotenciales)
        );
        assert_eq!(clasificados.competencia_directa.len(), 1);
        assert_eq!(clasificados.competencia_directa[0].place_id, "p2");
    }

    #[test]
    fn palabra_de_la_query_en_el_nombre_marca_competencia_directa() {
        let lugares = vec![lugar("p1", "Excursiones Cielo Sur", &["point_of_interest"])];
        let clasificados = clasificar_lugares(lugares, "excursiones nocturnas");
        assert_eq!(clasificados.competencia_directa.len(), 1);
    }

    #[test]
    fn atraccion_sin_keywords_es_competencia_indirecta() {
        let lugares = vec![lugar("p1", "Museo Gabriela Mistral", &["museum", "tourist_attraction"])];
        let clasificados = clasificar_lugares(lugares, "tour astronómico");
        assert_eq!(clasificados.competencia_indirecta.len(), 1);
    }

    #[test]
    fn tipos_desconocidos_caen_en_competencia_indirecta() {
        let lugares = vec![lugar("p1", "Farmacia Central", &["pharmacy"])];
        let clasificados = clasificar_lugares(lugares, "tour");
        assert_eq!(clasificados.competencia_indirecta.len(), 1);
    }

    #[test]
    fn la_particion_conserva_todos_los_lugares() {
        let lugares = vec![
            lugar("p1", "Observatorio Cerro Mayu", &["tourist_attraction", "night_club"]),
            lugar("p2", "Centro Astronómico Andino", &["tourist_attraction", "establishment"]),
            lugar("p3", "Museo Gabriela Mistral", &["museum", "tourist_attraction"]),
            lugar("p4", "Hotel Valle del Elqui", &["lodging", "establishment"]),
            lugar("p5", "Restaurant Solar de Baviera", &["restaurant", "food"]),
            lugar("p6", "Kiosco Plaza", &["establishment"]),
        ];
        let total = lugares.len();

        let clasificados = clasificar_lugares(lugares, "tour astronómico");

        assert_eq!(clasificados.total(), total);
        let resumen = clasificados.resumen();
        assert_eq!(resumen.competencia_directa, 2);
        assert_eq!(resumen.competencia_indirecta, 2);
        assert_eq!(resumen.colaboradores_potenciales, 2);
        for bucket in [
            &clasificados.competencia_directa,
            &clasificados.competencia_indirecta,
            &clasificados.colaboradores_potenciales,
        ] {
            assert!(bucket.iter().all(|p| p.category.is_some()));
        }
    }
}
