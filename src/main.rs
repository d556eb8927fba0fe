use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use taller_comisiones::config::environment::EnvironmentConfig;
use taller_comisiones::database::DatabaseConnection;
use taller_comisiones::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use taller_comisiones::routes::create_api_router;
use taller_comisiones::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🔧 Auto Andrade - API de Taller y Comisiones");
    info!("============================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    let config = EnvironmentConfig::default();

    // En producción el CORS se limita a los orígenes configurados
    let cors = if config.is_production() && !config.cors_origins.is_empty() {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let app_state = AppState::new(pool, config.clone());

    let app = create_api_router()
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let addr = config.server_url();

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  / - Bienvenida");
    info!("   GET  /health - Health check con ping a base de datos");
    info!("👷 Endpoints - Mecánicos:");
    info!("   POST /api/mecanicos - Registrar mecánico");
    info!("   GET  /api/mecanicos - Listar mecánicos");
    info!("   GET  /api/mecanicos/buscar - Buscar mecánicos por nombre o cédula");
    info!("   GET  /api/mecanicos/:id - Obtener mecánico");
    info!("   PUT  /api/mecanicos/:id - Actualizar mecánico");
    info!("   DELETE /api/mecanicos/:id - Eliminar o desactivar mecánico");
    info!("   GET  /api/mecanicos/:id/estadisticas - Estadísticas de comisiones");
    info!("   GET  /api/mecanicos/:id/trabajos - Trabajos del mecánico");
    info!("   GET  /api/mecanicos/reporte/mensual/:mes - Reporte mensual");
    info!("   GET  /api/mecanicos/:id/comisiones/quincena/:quincena - Comisiones de la quincena");
    info!("   POST /api/mecanicos/:id/comisiones/quincena/:quincena/estado - Liquidar quincena");
    info!("🔩 Endpoints - Trabajos:");
    info!("   POST /api/trabajos - Crear trabajo con gastos");
    info!("   GET  /api/trabajos - Listar trabajos con totales");
    info!("   GET  /api/trabajos/trabajo/:id - Obtener trabajo");
    info!("   PUT  /api/trabajos/trabajo/:id - Actualizar trabajo y gastos");
    info!("   DELETE /api/trabajos/trabajo/:id - Eliminar trabajo");
    info!("   GET  /api/trabajos/trabajo/:id/gastos - Gastos del trabajo");
    info!("   PUT  /api/trabajos/:id/mecanicos - Asignar mecánicos al trabajo");
    info!("   GET  /api/trabajos/:id/mecanicos - Mecánicos asignados");
    info!("💰 Endpoints - Comisiones:");
    info!("   POST /api/comisiones/generar-quincena/:quincena - Estampar quincena");
    info!("   GET  /api/comisiones/quincena/:quincena - Comisiones de la quincena");
    info!("   PUT  /api/comisiones/:id/estado - Cambiar estado de una comisión");
    info!("   GET  /api/comisiones/reporte-financiero/:quincena - Reporte financiero");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
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
