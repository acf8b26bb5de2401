use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::eliminar_entidad;
use crate::dto::{ApiResponse, ListFilters};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::auth::Permiso;
use crate::models::servicio::{Servicio, ServicioRequest};
use crate::repositories::servicio_repository::ServicioRepository;
use crate::services::authorization_service::AuthorizationService;
use crate::services::integridad::{DeleteOutcome, Entidad};
use crate::utils::errors::{not_found_error, AppError};

pub struct ServicioController {
    pool: PgPool,
}

impl ServicioController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: ServicioRequest,
    ) -> Result<ApiResponse<Servicio>, AppError> {
        AuthorizationService::require(user, Permiso::GestionarServicios)?;
        request.validate()?;

        let mut tx = self.pool.begin().await?;
        let servicio = ServicioRepository::create(&mut tx, user.taller_id, &request).await?;
        tx.commit().await?;

        info!(servicio_id = %servicio.id, price = %servicio.price, "🛠️ Servicio creado");
        Ok(ApiResponse::success_with_message(servicio, "Servicio creado exitosamente"))
    }

    pub async fn get_by_id(&self, user: &AuthenticatedUser, id: Uuid) -> Result<Servicio, AppError> {
        AuthorizationService::require(user, Permiso::VerServicios)?;

        let mut conn = self.pool.acquire().await?;
        ServicioRepository::find_by_id(&mut conn, user.taller_id, id)
            .await?
            .ok_or_else(|| not_found_error("Servicio", &id.to_string()))
    }

    pub async fn list(&self, user: &AuthenticatedUser, filters: ListFilters) -> Result<Vec<Servicio>, AppError> {
        AuthorizationService::require(user, Permiso::VerServicios)?;

        let mut conn = self.pool.acquire().await?;
        ServicioRepository::list(&mut conn, user.taller_id, &filters).await
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: ServicioRequest,
    ) -> Result<ApiResponse<Servicio>, AppError> {
        AuthorizationService::require(user, Permiso::GestionarServicios)?;
        request.validate()?;

        let mut tx = self.pool.begin().await?;
        let servicio = ServicioRepository::update(&mut tx, user.taller_id, id, &request)
            .await?
            .ok_or_else(|| not_found_error("Servicio", &id.to_string()))?;
        tx.commit().await?;

        info!(servicio_id = %id, "✏️ Servicio actualizado");
        Ok(ApiResponse::success_with_message(servicio, "Servicio actualizado exitosamente"))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<ApiResponse<DeleteOutcome>, AppError> {
        AuthorizationService::require(user, Permiso::GestionarServicios)?;

        let outcome = eliminar_entidad(&self.pool, user.taller_id, Entidad::Servicio(id)).await?;
        Ok(ApiResponse::success_with_message(outcome, "Servicio eliminado exitosamente"))
    }
}
