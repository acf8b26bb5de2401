use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::empleado_controller::EmpleadoController;
use crate::dto::{ApiResponse, ListFilters};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::empleado::{Empleado, EmpleadoRequest};
use crate::services::integridad::DeleteOutcome;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_empleado_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_empleados).post(create_empleado))
        .route("/:id", get(get_empleado).put(update_empleado).delete(delete_empleado))
}

async fn create_empleado(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<EmpleadoRequest>,
) -> Result<Json<ApiResponse<Empleado>>, AppError> {
    let controller = EmpleadoController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_empleados(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<ListFilters>,
) -> Result<Json<Vec<Empleado>>, AppError> {
    let controller = EmpleadoController::new(state.pool.clone());
    let response = controller.list(&user, filters).await?;
    Ok(Json(response))
}

async fn get_empleado(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Empleado>, AppError> {
    let controller = EmpleadoController::new(state.pool.clone());
    let response = controller.get_by_id(&user, id).await?;
    Ok(Json(response))
}

async fn update_empleado(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<EmpleadoRequest>,
) -> Result<Json<ApiResponse<Empleado>>, AppError> {
    let controller = EmpleadoController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn delete_empleado(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteOutcome>>, AppError> {
    let controller = EmpleadoController::new(state.pool.clone());
    let response = controller.delete(&user, id).await?;
    Ok(Json(response))
}
