use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::eliminar_entidad;
use crate::dto::{ApiResponse, ListFilters};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::auth::Permiso;
use crate::models::cliente::{Cliente, ClienteRequest};
use crate::models::vehiculo::Vehiculo;
use crate::repositories::cliente_repository::ClienteRepository;
use crate::repositories::vehiculo_repository::VehiculoRepository;
use crate::services::authorization_service::AuthorizationService;
use crate::services::integridad::{DeleteOutcome, Entidad};
use crate::utils::errors::{not_found_error, AppError};

pub struct ClienteController {
    pool: PgPool,
}

impl ClienteController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: ClienteRequest,
    ) -> Result<ApiResponse<Cliente>, AppError> {
        AuthorizationService::require(user, Permiso::GestionarClientes)?;
        request.validate()?;

        let mut tx = self.pool.begin().await?;
        let cliente = ClienteRepository::create(&mut tx, user.taller_id, &request).await?;
        tx.commit().await?;

        info!(cliente_id = %cliente.id, taller_id = %user.taller_id, "👤 Cliente creado");
        Ok(ApiResponse::success_with_message(cliente, "Cliente creado exitosamente"))
    }

    pub async fn get_by_id(&self, user: &AuthenticatedUser, id: Uuid) -> Result<Cliente, AppError> {
        AuthorizationService::require(user, Permiso::VerClientes)?;

        let mut conn = self.pool.acquire().await?;
        ClienteRepository::find_by_id(&mut conn, user.taller_id, id)
            .await?
            .ok_or_else(|| not_found_error("Cliente", &id.to_string()))
    }

    pub async fn list(&self, user: &AuthenticatedUser, filters: ListFilters) -> Result<Vec<Cliente>, AppError> {
        AuthorizationService::require(user, Permiso::VerClientes)?;

        let mut conn = self.pool.acquire().await?;
        ClienteRepository::list(&mut conn, user.taller_id, &filters).await
    }

    /// Vehículos registrados a nombre del cliente
    pub async fn vehiculos(&self, user: &AuthenticatedUser, id: Uuid) -> Result<Vec<Vehiculo>, AppError> {
        AuthorizationService::require(user, Permiso::VerVehiculos)?;

        let mut conn = self.pool.acquire().await?;
        if ClienteRepository::find_by_id(&mut conn, user.taller_id, id).await?.is_none() {
            return Err(not_found_error("Cliente", &id.to_string()));
        }
        VehiculoRepository::find_by_cliente(&mut conn, user.taller_id, id).await
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: ClienteRequest,
    ) -> Result<ApiResponse<Cliente>, AppError> {
        AuthorizationService::require(user, Permiso::GestionarClientes)?;
        request.validate()?;

        let mut tx = self.pool.begin().await?;
        let cliente = ClienteRepository::update(&mut tx, user.taller_id, id, &request)
            .await?
            .ok_or_else(|| not_found_error("Cliente", &id.to_string()))?;
        tx.commit().await?;

        info!(cliente_id = %id, "✏️ Cliente actualizado");
        Ok(ApiResponse::success_with_message(cliente, "Cliente actualizado exitosamente"))
    }

    /// Elimina el cliente y desvincula vehículos y órdenes cerradas
    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<ApiResponse<DeleteOutcome>, AppError> {
        AuthorizationService::require(user, Permiso::GestionarClientes)?;

        let outcome = eliminar_entidad(&self.pool, user.taller_id, Entidad::Cliente(id)).await?;
        Ok(ApiResponse::success_with_message(outcome, "Cliente eliminado exitosamente"))
    }
}
