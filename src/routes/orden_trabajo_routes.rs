use axum::{
    extract::{Path, Query, State},
    routing::{get, patch},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::orden_trabajo_controller::OrdenTrabajoController;
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::orden_trabajo::{CambiarEstadoRequest, OrdenFilters, OrdenTrabajo, OrdenTrabajoRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_orden_trabajo_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ordenes).post(create_orden))
        .route("/:id", get(get_orden).put(update_orden).delete(delete_orden))
        .route("/:id/estado", patch(cambiar_estado_orden))
}

async fn create_orden(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<OrdenTrabajoRequest>,
) -> Result<Json<ApiResponse<OrdenTrabajo>>, AppError> {
    let controller = OrdenTrabajoController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_ordenes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<OrdenFilters>,
) -> Result<Json<Vec<OrdenTrabajo>>, AppError> {
    let controller = OrdenTrabajoController::new(state.pool.clone());
    let response = controller.list(&user, filters).await?;
    Ok(Json(response))
}

async fn get_orden(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrdenTrabajo>, AppError> {
    let controller = OrdenTrabajoController::new(state.pool.clone());
    let response = controller.get_by_id(&user, id).await?;
    Ok(Json(response))
}

async fn update_orden(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<OrdenTrabajoRequest>,
) -> Result<Json<ApiResponse<OrdenTrabajo>>, AppError> {
    let controller = OrdenTrabajoController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn cambiar_estado_orden(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<CambiarEstadoRequest>,
) -> Result<Json<ApiResponse<OrdenTrabajo>>, AppError> {
    let controller = OrdenTrabajoController::new(state.pool.clone());
    let response = controller.cambiar_estado(&user, id, request).await?;
    Ok(Json(response))
}

async fn delete_orden(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = OrdenTrabajoController::new(state.pool.clone());
    let response = controller.delete(&user, id).await?;
    Ok(Json(response))
}
