//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del dominio: lugares,
//! clasificación de competencia, reseñas y análisis de opiniones.

pub mod opinion;
pub mod place;
