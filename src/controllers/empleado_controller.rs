use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::eliminar_entidad;
use crate::dto::{ApiResponse, ListFilters};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::auth::Permiso;
use crate::models::empleado::{Empleado, EmpleadoRequest};
use crate::repositories::empleado_repository::EmpleadoRepository;
use crate::services::authorization_service::AuthorizationService;
use crate::services::integridad::{DeleteOutcome, Entidad};
use crate::utils::errors::{not_found_error, AppError};

pub struct EmpleadoController {
    pool: PgPool,
}

impl EmpleadoController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: EmpleadoRequest,
    ) -> Result<ApiResponse<Empleado>, AppError> {
        AuthorizationService::require(user, Permiso::GestionarEmpleados)?;
        request.validate()?;

        let mut tx = self.pool.begin().await?;
        let empleado = EmpleadoRepository::create(&mut tx, user.taller_id, &request).await?;
        tx.commit().await?;

        info!(empleado_id = %empleado.id, position = %empleado.position, "👷 Empleado creado");
        Ok(ApiResponse::success_with_message(empleado, "Empleado creado exitosamente"))
    }

    pub async fn get_by_id(&self, user: &AuthenticatedUser, id: Uuid) -> Result<Empleado, AppError> {
        AuthorizationService::require(user, Permiso::VerEmpleados)?;

        let mut conn = self.pool.acquire().await?;
        EmpleadoRepository::find_by_id(&mut conn, user.taller_id, id)
            .await?
            .ok_or_else(|| not_found_error("Empleado", &id.to_string()))
    }

    pub async fn list(&self, user: &AuthenticatedUser, filters: ListFilters) -> Result<Vec<Empleado>, AppError> {
        AuthorizationService::require(user, Permiso::VerEmpleados)?;

        let mut conn = self.pool.acquire().await?;
        EmpleadoRepository::list(&mut conn, user.taller_id, &filters).await
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: EmpleadoRequest,
    ) -> Result<ApiResponse<Empleado>, AppError> {
        AuthorizationService::require(user, Permiso::GestionarEmpleados)?;
        request.validate()?;

        let mut tx = self.pool.begin().await?;
        let empleado = EmpleadoRepository::update(&mut tx, user.taller_id, id, &request)
            .await?
            .ok_or_else(|| not_found_error("Empleado", &id.to_string()))?;
        tx.commit().await?;

        info!(empleado_id = %id, "✏️ Empleado actualizado");
        Ok(ApiResponse::success_with_message(empleado, "Empleado actualizado exitosamente"))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<ApiResponse<DeleteOutcome>, AppError> {
        AuthorizationService::require(user, Permiso::GestionarEmpleados)?;

        let outcome = eliminar_entidad(&self.pool, user.taller_id, Entidad::Empleado(id)).await?;
        Ok(ApiResponse::success_with_message(outcome, "Empleado eliminado exitosamente"))
    }
}
