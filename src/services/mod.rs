//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación:
//! la orquestación de búsquedas con caché y el camino de respaldo.

pub mod fallback;
pub mod lookup_service;

pub use lookup_service::LookupService;
