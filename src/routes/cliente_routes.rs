use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::cliente_controller::ClienteController;
use crate::dto::{ApiResponse, ListFilters};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::cliente::{Cliente, ClienteRequest};
use crate::models::vehiculo::Vehiculo;
use crate::services::integridad::DeleteOutcome;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_cliente_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clientes).post(create_cliente))
        .route("/:id", get(get_cliente).put(update_cliente).delete(delete_cliente))
        .route("/:id/vehiculos", get(list_vehiculos_cliente))
}

async fn create_cliente(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<ClienteRequest>,
) -> Result<Json<ApiResponse<Cliente>>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_clientes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<ListFilters>,
) -> Result<Json<Vec<Cliente>>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.list(&user, filters).await?;
    Ok(Json(response))
}

async fn get_cliente(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Cliente>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.get_by_id(&user, id).await?;
    Ok(Json(response))
}

async fn list_vehiculos_cliente(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Vehiculo>>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.vehiculos(&user, id).await?;
    Ok(Json(response))
}

async fn update_cliente(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<ClienteRequest>,
) -> Result<Json<ApiResponse<Cliente>>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn delete_cliente(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteOutcome>>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.delete(&user, id).await?;
    Ok(Json(response))
}
