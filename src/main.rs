use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use taller_backend::config::EnvironmentConfig;
use taller_backend::database::{run_migrations, DatabaseConnection};
use taller_backend::routes::create_app_router;
use taller_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging (RUST_LOG, por defecto info)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taller_backend=debug,tower_http=info,info")),
        )
        .init();

    info!("🔧 Taller Backend - API de gestión de talleres");
    info!("==============================================");

    let config = EnvironmentConfig::from_env()?;
    if config.is_development() && config.cors_origins.is_empty() {
        warn!("⚠️ CORS_ORIGINS vacío: se permiten todos los orígenes");
    }

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();
    run_migrations(&pool).await?;

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app_router(AppState::new(pool, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("👤 Clientes: GET|POST /api/clientes, GET|PUT|DELETE /api/clientes/:id, GET /api/clientes/:id/vehiculos");
    info!("🚗 Vehículos: GET|POST /api/vehiculos, GET|PUT|DELETE /api/vehiculos/:id, GET /api/vehiculos/:id/ordenes");
    info!("👷 Empleados: GET|POST /api/empleados, GET|PUT|DELETE /api/empleados/:id");
    info!("🛠️ Servicios: GET|POST /api/servicios, GET|PUT|DELETE /api/servicios/:id");
    info!("🔧 Órdenes: GET|POST /api/ordenes, GET|PUT|DELETE /api/ordenes/:id, PATCH /api/ordenes/:id/estado");
    info!("📊 Dashboard: GET /api/dashboard");
    info!("📈 Reportes: GET /api/reportes/ingresos, /api/reportes/empleados, /api/reportes/ordenes");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
