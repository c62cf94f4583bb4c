//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los stores de caché y el proveedor upstream
//! se construyen al arranque y se inyectan aquí; no hay singletons de módulo.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::lookup_service::LookupService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub lookup: Arc<LookupService>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, lookup: LookupService) -> Self {
        Self {
            config,
            lookup: Arc::new(lookup),
        }
    }
}
