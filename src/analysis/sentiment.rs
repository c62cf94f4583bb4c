//! Análisis de sentimiento por conteo de palabras clave
//!
//! No hay modelo de NLP: el sentimiento se decide por tally de vocabularios
//! fijos y los temas se cuentan por presencia por reseña (número de reseñas
//! que mencionan el tema, no ocurrencias totales).

use crate::analysis::keywords;
use crate::models::opinion::{
    Aspecto, DistribucionSentimiento, Fragmento, Insights, Review, Sentimiento, TemaMencion,
};

/// Parámetros por punto de llamada del analizador
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerConfig {
    /// Presupuesto de caracteres por extracto
    pub excerpt_len: usize,
    /// Cuántos temas rankeados conservar
    pub top_themes: usize,
    /// Cuántos extractos por bucket conservar
    pub top_excerpts: usize,
}

impl AnalyzerConfig {
    /// Configuración del camino con datos de la API
    pub fn live() -> Self {
        Self {
            excerpt_len: 120,
            top_themes: 6,
            top_excerpts: 4,
        }
    }

    /// Configuración del camino con datos placeholder
    pub fn placeholder() -> Self {
        Self {
            excerpt_len: 100,
            top_themes: 5,
            top_excerpts: 3,
        }
    }
}

/// Resultado agregado del analizador sobre una lista de reseñas
#[derive(Debug, Clone)]
pub struct SentimentSummary {
    pub distribucion: DistribucionSentimiento,
    pub predominante: Sentimiento,
    pub temas_principales: Vec<TemaMencion>,
    pub fortalezas: Vec<Fragmento>,
    pub debilidades: Vec<Fragmento>,
    pub insights: Insights,
}

/// Sentimiento de un texto por tally de palabras clave; el empate es neutro.
pub fn sentiment_of(texto: &str) -> Sentimiento {
    let texto_lower = texto.to_lowercase();
    let positivas = keywords::PALABRAS_POSITIVAS
        .iter()
        .filter(|palabra| texto_lower.contains(*palabra))
        .count();
    let negativas = keywords::PALABRAS_NEGATIVAS
        .iter()
        .filter(|palabra| texto_lower.contains(*palabra))
        .count();

    if positivas > negativas {
        Sentimiento::Positivo
    } else if negativas > positivas {
        Sentimiento::Negativo
    } else {
        Sentimiento::Neutro
    }
}

/// Analiza las reseñas en una sola pasada determinista.
pub fn analyze(reviews: &[Review], config: &AnalyzerConfig) -> SentimentSummary {
    let mut distribucion = DistribucionSentimiento::default();
    let mut conteo_temas: Vec<(&str, usize)> =
        keywords::TEMAS.iter().map(|tema| (*tema, 0)).collect();
    let mut fortalezas = Vec::new();
    let mut debilidades = Vec::new();

    for review in reviews {
        let texto_lower = review.text.to_lowercase();

        distribucion.registrar(sentiment_of(&review.text));

        // Presencia por reseña: un tema repetido en el mismo texto cuenta una vez
        for (tema, conteo) in conteo_temas.iter_mut() {
            if texto_lower.contains(*tema) {
                *conteo += 1;
            }
        }

        if review.rating >= 4 {
            if keywords::INDICADORES_FORTALEZA
                .iter()
                .any(|frase| texto_lower.contains(frase))
            {
                fortalezas.push(Fragmento {
                    frase: extracto(&review.text, config.excerpt_len),
                    rating: review.rating,
                    autor: Some(review.author_name.clone()),
                    aspecto: Aspecto::ExperienciaGeneral,
                });
            }
        } else if review.rating <= 3
            && keywords::INDICADORES_DEBILIDAD
                .iter()
                .any(|frase| texto_lower.contains(frase))
        {
            let aspecto = if keywords::PALABRAS_PRECIO
                .iter()
                .any(|palabra| texto_lower.contains(palabra))
            {
                Aspecto::PrecioExpectativas
            } else {
                Aspecto::ExperienciaGeneral
            };
            debilidades.push(Fragmento {
                frase: extracto(&review.text, config.excerpt_len),
                rating: review.rating,
                autor: Some(review.author_name.clone()),
                aspecto,
            });
        }
    }

    let conteo = |tema: &str| {
        conteo_temas
            .iter()
            .find(|(t, _)| *t == tema)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    };
    let insights = Insights {
        precio_mencionado: conteo("precio") + conteo("caro") > 0,
        apto_familias: conteo("niños") + conteo("familia") > 0,
        calidad_servicio: conteo("servicio") + conteo("amable") + conteo("profesional") > 0,
        calidad_guia: conteo("guía") + conteo("conocedor") + conteo("didáctico") > 0,
        calidad_equipo: conteo("equipo") + conteo("telescopio") + conteo("profesional") > 0,
        limpieza_mencionada: conteo("limpio") + conteo("sucio") > 0,
        velocidad_servicio: conteo("rápido") + conteo("lento") > 0,
    };

    // sort estable: los empates conservan el orden de declaración del vocabulario
    let mut temas_principales: Vec<TemaMencion> = conteo_temas
        .iter()
        .filter(|(_, conteo)| *conteo > 0)
        .map(|(tema, conteo)| TemaMencion {
            tema: tema.to_string(),
            menciones: *conteo,
        })
        .collect();
    temas_principales.sort_by(|a, b| b.menciones.cmp(&a.menciones));
    temas_principales.truncate(config.top_themes);

    fortalezas.truncate(config.top_excerpts);
    debilidades.truncate(config.top_excerpts);

    SentimentSummary {
        predominante: distribucion.predominante(),
        distribucion,
        temas_principales,
        fortalezas,
        debilidades,
        insights,
    }
}

/// Recorta un texto al presupuesto de caracteres, con marcador de elipsis.
pub fn extracto(texto: &str, max_chars: usize) -> String {
    if texto.chars().count() > max_chars {
        let recortado: String = texto.chars().take(max_chars).collect();
        format!("{}...", recortado)
    } else {
        texto.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resena(rating: u8, text: &str) -> Review {
        Review {
            author_name: "María González".to_string(),
            rating,
            text: text.to_string(),
            time: None,
        }
    }

    #[test]
    fn sentimiento_positivo_negativo_y_empate() {
        assert_eq!(
            sentiment_of("Excelente experiencia, vale la pena"),
            Sentimiento::Positivo
        );
        assert_eq!(sentiment_of("Muy malo y terrible"), Sentimiento::Negativo);
        assert_eq!(sentiment_of("Excelente pero caro"), Sentimiento::Neutro);
        assert_eq!(sentiment_of(""), Sentimiento::Neutro);
    }

    #[test]
    fn la_distribucion_suma_el_total_de_resenas() {
        let reviews = vec![
            resena(5, "Excelente tour"),
            resena(2, "Muy malo"),
            resena(3, "Estuvo bien"),
            resena(4, "Perfecto pero caro"),
        ];
        let resumen = analyze(&reviews, &AnalyzerConfig::live());
        assert_eq!(resumen.distribucion.total(), reviews.len());
    }

    #[test]
    fn resena_positiva_corta_aparece_integra_en_fortalezas() {
        let reviews = vec![resena(5, "Experiencia excelente, muy recomiendo")];
        let resumen = analyze(&reviews, &AnalyzerConfig::live());

        assert_eq!(resumen.distribucion.positivo, 1);
        assert_eq!(resumen.predominante, Sentimiento::Positivo);
        assert_eq!(resumen.fortalezas.len(), 1);
        assert_eq!(
            resumen.fortalezas[0].frase,
            "Experiencia excelente, muy recomiendo"
        );
        assert_eq!(resumen.fortalezas[0].aspecto, Aspecto::ExperienciaGeneral);
    }

    #[test]
    fn los_temas_se_cuentan_por_presencia_por_resena() {
        let reviews = vec![
            resena(4, "El precio del tour y el precio de la entrada"),
            resena(3, "Buen precio"),
        ];
        let resumen = analyze(&reviews, &AnalyzerConfig::live());
        let precio = resumen
            .temas_principales
            .iter()
            .find(|t| t.tema == "precio")
            .expect("tema precio presente");
        assert_eq!(precio.menciones, 2);
    }

    #[test]
    fn empates_de_temas_conservan_el_orden_del_vocabulario() {
        let reviews = vec![resena(3, "La guía habló del precio del equipo")];
        let resumen = analyze(&reviews, &AnalyzerConfig::live());
        let temas: Vec<&str> = resumen
            .temas_principales
            .iter()
            .map(|t| t.tema.as_str())
            .collect();
        assert_eq!(temas, vec!["guía", "precio", "equipo"]);
    }

    #[test]
    fn extracto_largo_se_recorta_con_elipsis() {
        let texto = "a".repeat(150);
        let recortado = extracto(&texto, 120);
        assert!(recortado.ends_with("..."));
        assert_eq!(recortado.chars().count(), 123);

        let corto = extracto("breve", 120);
        assert_eq!(corto, "breve");
    }

    #[test]
    fn debilidad_por_precio_se_atribuye_al_aspecto_precio() {
        let reviews = vec![resena(2, "Demasiado caro para lo que ofrecen")];
        let resumen = analyze(&reviews, &AnalyzerConfig::live());
        assert_eq!(resumen.debilidades.len(), 1);
        assert_eq!(resumen.debilidades[0].aspecto, Aspecto::PrecioExpectativas);
        assert!(resumen.insights.precio_mencionado);
    }

    #[test]
    fn los_extractos_respetan_el_limite_por_bucket() {
        let reviews: Vec<Review> = (0..6)
            .map(|i| resena(5, &format!("Tour excelente número {}", i)))
            .collect();
        let resumen = analyze(&reviews, &AnalyzerConfig::placeholder());
        assert_eq!(resumen.fortalezas.len(), 3);
    }

    #[test]
    fn rating_alto_sin_indicadores_no_genera_fortaleza() {
        let reviews = vec![resena(5, "Estuvo bien, nada especial")];
        let resumen = analyze(&reviews, &AnalyzerConfig::live());
        assert!(resumen.fortalezas.is_empty());
        assert!(resumen.debilidades.is_empty());
    }
}
