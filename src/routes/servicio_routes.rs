use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::servicio_controller::ServicioController;
use crate::dto::{ApiResponse, ListFilters};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::servicio::{Servicio, ServicioRequest};
use crate::services::integridad::DeleteOutcome;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_servicio_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_servicios).post(create_servicio))
        .route("/:id", get(get_servicio).put(update_servicio).delete(delete_servicio))
}

async fn create_servicio(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<ServicioRequest>,
) -> Result<Json<ApiResponse<Servicio>>, AppError> {
    let controller = ServicioController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_servicios(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<ListFilters>,
) -> Result<Json<Vec<Servicio>>, AppError> {
    let controller = ServicioController::new(state.pool.clone());
    let response = controller.list(&user, filters).await?;
    Ok(Json(response))
}

async fn get_servicio(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Servicio>, AppError> {
    let controller = ServicioController::new(state.pool.clone());
    let response = controller.get_by_id(&user, id).await?;
    Ok(Json(response))
}

async fn update_servicio(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<ServicioRequest>,
) -> Result<Json<ApiResponse<Servicio>>, AppError> {
    let controller = ServicioController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn delete_servicio(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteOutcome>>, AppError> {
    let controller = ServicioController::new(state.pool.clone());
    let response = controller.delete(&user, id).await?;
    Ok(Json(response))
}
