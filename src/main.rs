use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use explorador_turistico::api;
use explorador_turistico::cache::CacheStores;
use explorador_turistico::clients::{GooglePlacesClient, PlacesProvider};
use explorador_turistico::config::environment::EnvironmentConfig;
use explorador_turistico::middleware::cors::cors_middleware;
use explorador_turistico::services::lookup_service::LookupService;
use explorador_turistico::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(if config.is_development() {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    info!("🔭 Explorador Turístico - Inteligencia de mercado con Google Places");
    info!("===================================================================");

    // Stores de caché: cinco namespaces independientes bajo el mismo directorio
    let stores = CacheStores::new(&config.cache_dir);
    info!("💾 Caché en disco en: {:?}", config.cache_dir);

    // Proveedor upstream; sin clave se sirven datos placeholder
    let provider: Option<Arc<dyn PlacesProvider>> = match &config.google_api_key {
        Some(key) => {
            info!("✅ GOOGLE_API_KEY detectada, usando Google Places API");
            Some(Arc::new(GooglePlacesClient::new(key.clone())))
        }
        None => {
            info!("⚠️ GOOGLE_API_KEY no configurada, se servirán datos placeholder");
            None
        }
    };

    let lookup = LookupService::new(stores, provider);
    let app_state = AppState::new(config.clone(), lookup);

    let app = api::create_api_router()
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("   POST /api/places/search - Mapeo de competencia y colaboradores");
    info!("   POST /api/places/details - Detalles completos de un lugar");
    info!("   POST /api/reviews/analyze - Análisis de opiniones");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
