use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::dashboard_controller::DashboardController;
use crate::controllers::reporte_controller::{OrdenesReporteQuery, ReporteController};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::reporte::{
    DashboardSummary, DesempenoEmpleado, IngresoPorServicio, OrdenReporte, Reporte, ReporteFilters,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

pub fn create_reporte_router() -> Router<AppState> {
    Router::new()
        .route("/ingresos", get(reporte_ingresos))
        .route("/empleados", get(reporte_empleados))
        .route("/ordenes", get(reporte_ordenes))
}

async fn get_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<DashboardSummary>, AppError> {
    let controller = DashboardController::new(state.pool.clone());
    let response = controller.summary(&user).await?;
    Ok(Json(response))
}

async fn reporte_ingresos(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<ReporteFilters>,
) -> Result<Json<Reporte<IngresoPorServicio>>, AppError> {
    let controller = ReporteController::new(state.pool.clone());
    let response = controller.ingresos(&user, filters).await?;
    Ok(Json(response))
}

async fn reporte_empleados(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<ReporteFilters>,
) -> Result<Json<Reporte<DesempenoEmpleado>>, AppError> {
    let controller = ReporteController::new(state.pool.clone());
    let response = controller.empleados(&user, filters).await?;
    Ok(Json(response))
}

async fn reporte_ordenes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<OrdenesReporteQuery>,
) -> Result<Json<Reporte<OrdenReporte>>, AppError> {
    let controller = ReporteController::new(state.pool.clone());
    let response = controller.ordenes(&user, query).await?;
    Ok(Json(response))
}
