use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehiculo_controller::VehiculoController;
use crate::dto::{ApiResponse, ListFilters};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::orden_trabajo::{OrdenFilters, OrdenTrabajo};
use crate::models::vehiculo::{Vehiculo, VehiculoRequest};
use crate::services::integridad::DeleteOutcome;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehiculo_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehiculos).post(create_vehiculo))
        .route("/:id", get(get_vehiculo).put(update_vehiculo).delete(delete_vehiculo))
        .route("/:id/ordenes", get(list_ordenes_vehiculo))
}

async fn create_vehiculo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<VehiculoRequest>,
) -> Result<Json<ApiResponse<Vehiculo>>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_vehiculos(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<ListFilters>,
) -> Result<Json<Vec<Vehiculo>>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller.list(&user, filters).await?;
    Ok(Json(response))
}

async fn get_vehiculo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehiculo>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller.get_by_id(&user, id).await?;
    Ok(Json(response))
}

async fn list_ordenes_vehiculo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Query(filters): Query<OrdenFilters>,
) -> Result<Json<Vec<OrdenTrabajo>>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller.ordenes(&user, id, filters).await?;
    Ok(Json(response))
}

async fn update_vehiculo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<VehiculoRequest>,
) -> Result<Json<ApiResponse<Vehiculo>>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn delete_vehiculo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteOutcome>>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller.delete(&user, id).await?;
    Ok(Json(response))
}
