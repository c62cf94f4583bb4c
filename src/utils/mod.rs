//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para el manejo de errores del borde HTTP.

pub mod errors;
