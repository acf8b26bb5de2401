//! Rutas HTTP
//!
//! Todo lo que cuelga de `/api` exige un token Bearer válido; `/health`
//! queda público.

pub mod cliente_routes;
pub mod empleado_routes;
pub mod orden_trabajo_routes;
pub mod reporte_routes;
pub mod servicio_routes;
pub mod vehiculo_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{auth_middleware, cors_middleware};
use crate::state::AppState;

const MAX_CONCURRENT_REQUESTS: usize = 256;

/// Router completo de la aplicación con sus capas
pub fn create_app_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/clientes", cliente_routes::create_cliente_router())
        .nest("/vehiculos", vehiculo_routes::create_vehiculo_router())
        .nest("/empleados", empleado_routes::create_empleado_router())
        .nest("/servicios", servicio_routes::create_servicio_router())
        .nest("/ordenes", orden_trabajo_routes::create_orden_trabajo_router())
        .nest("/dashboard", reporte_routes::create_dashboard_router())
        .nest("/reportes", reporte_routes::create_reporte_router())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let cors = cors_middleware(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
