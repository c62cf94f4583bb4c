//! Derivación determinista de claves de caché
//!
//! Funciones puras: la misma entrada lógica produce siempre la misma clave.
//! La única normalización es pasar a minúsculas; no hay matching difuso.

/// Clave para búsquedas de lugares: md5 de la tupla normalizada
/// `query_ubicacion_radio`.
pub fn places_key(query: &str, ubicacion: &str, radio_km: u32) -> String {
    let key_string = format!(
        "{}_{}_{}",
        query.to_lowercase(),
        ubicacion.to_lowercase(),
        radio_km
    );
    format!("{:x}", md5::compute(key_string.as_bytes()))
}

/// Clave para geocodificación: la ubicación en minúsculas.
pub fn geocode_key(ubicacion: &str) -> String {
    ubicacion.to_lowercase()
}

// Para consultas por identificador de lugar, el propio place_id es la clave
// (globalmente único); no hay función de derivación.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn la_misma_entrada_produce_la_misma_clave() {
        let a = places_key("tour astronómico", "Valle del Elqui", 50);
        let b = places_key("tour astronómico", "Valle del Elqui", 50);
        assert_eq!(a, b);
    }

    #[test]
    fn el_cambio_de_mayusculas_no_cambia_la_clave() {
        let a = places_key("Tour Astronómico", "VALLE DEL ELQUI", 50);
        let b = places_key("tour astronómico", "valle del elqui", 50);
        assert_eq!(a, b);
    }

    #[test]
    fn entradas_distintas_producen_claves_distintas() {
        let base = places_key("tour astronómico", "Valle del Elqui", 50);
        assert_ne!(base, places_key("tour astronómico", "Valle del Elqui", 25));
        assert_ne!(base, places_key("cabalgatas", "Valle del Elqui", 50));
        assert_ne!(base, places_key("tour astronómico", "San Pedro de Atacama", 50));
    }

    #[test]
    fn geocode_key_normaliza_a_minusculas() {
        assert_eq!(geocode_key("Valle del Elqui"), "valle del elqui");
        assert_eq!(geocode_key("valle del elqui"), geocode_key("VALLE DEL ELQUI"));
    }
}
