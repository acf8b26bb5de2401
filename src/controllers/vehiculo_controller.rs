use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::{eliminar_entidad, exigir_cliente};
use crate::dto::{ApiResponse, ListFilters};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::auth::Permiso;
use crate::models::orden_trabajo::{OrdenFilters, OrdenTrabajo};
use crate::models::vehiculo::{Vehiculo, VehiculoRequest};
use crate::repositories::cliente_repository::ClienteRepository;
use crate::repositories::integridad_repository::PgIntegrityStore;
use crate::repositories::orden_trabajo_repository::OrdenTrabajoRepository;
use crate::repositories::vehiculo_repository::VehiculoRepository;
use crate::services::authorization_service::AuthorizationService;
use crate::services::integridad::{check_vehiculo_owner_change, DeleteOutcome, Entidad, IntegrityStore};
use crate::utils::errors::{not_found_error, validation_error, AppError};

pub struct VehiculoController {
    pool: PgPool,
}

impl VehiculoController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: VehiculoRequest,
    ) -> Result<ApiResponse<Vehiculo>, AppError> {
        AuthorizationService::require(user, Permiso::GestionarVehiculos)?;
        let request = request.normalized();
        request.validate()?;
        let cliente_id = exigir_cliente(request.cliente_id, false)?;

        let mut tx = self.pool.begin().await?;
        verificar_cliente(&mut tx, user.taller_id, cliente_id).await?;
        let vehiculo = VehiculoRepository::create(&mut tx, user.taller_id, &request).await?;
        tx.commit().await?;

        info!(
            vehiculo_id = %vehiculo.id,
            license_plate = %vehiculo.license_plate,
            "🚗 Vehículo registrado"
        );
        Ok(ApiResponse::success_with_message(vehiculo, "Vehículo creado exitosamente"))
    }

    pub async fn get_by_id(&self, user: &AuthenticatedUser, id: Uuid) -> Result<Vehiculo, AppError> {
        AuthorizationService::require(user, Permiso::VerVehiculos)?;

        let mut conn = self.pool.acquire().await?;
        VehiculoRepository::find_by_id(&mut conn, user.taller_id, id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))
    }

    pub async fn list(&self, user: &AuthenticatedUser, filters: ListFilters) -> Result<Vec<Vehiculo>, AppError> {
        AuthorizationService::require(user, Permiso::VerVehiculos)?;

        let mut conn = self.pool.acquire().await?;
        VehiculoRepository::list(&mut conn, user.taller_id, &filters).await
    }

    /// Historial de órdenes del vehículo
    pub async fn ordenes(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        filters: OrdenFilters,
    ) -> Result<Vec<OrdenTrabajo>, AppError> {
        AuthorizationService::require(user, Permiso::VerOrdenes)?;

        let mut conn = self.pool.acquire().await?;
        if VehiculoRepository::find_by_id(&mut conn, user.taller_id, id).await?.is_none() {
            return Err(not_found_error("Vehículo", &id.to_string()));
        }

        let filters = OrdenFilters {
            vehiculo_id: Some(id),
            ..filters
        };
        OrdenTrabajoRepository::list(&mut conn, user.taller_id, &filters).await
    }

    /// Actualización del registro completo. Un vehículo desvinculado puede
    /// actualizarse con `cliente_id` en `null`; el dueño no cambia mientras
    /// haya órdenes activas.
    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: VehiculoRequest,
    ) -> Result<ApiResponse<Vehiculo>, AppError> {
        AuthorizationService::require(user, Permiso::GestionarVehiculos)?;
        let request = request.normalized();
        request.validate()?;

        let mut tx = self.pool.begin().await?;

        let actual = VehiculoRepository::find_by_id(&mut tx, user.taller_id, id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))?;

        let cliente_id = exigir_cliente(request.cliente_id, actual.cliente_id.is_none())?;
        verificar_cliente(&mut tx, user.taller_id, cliente_id).await?;

        if cliente_id != actual.cliente_id {
            let active_orders = PgIntegrityStore::new(&mut tx, user.taller_id)
                .count_active_orders(Entidad::Vehiculo(id))
                .await?;
            check_vehiculo_owner_change(actual.cliente_id, cliente_id, active_orders).into_result()?;
        }

        let vehiculo = VehiculoRepository::update(&mut tx, user.taller_id, id, &request)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))?;
        tx.commit().await?;

        info!(vehiculo_id = %id, "✏️ Vehículo actualizado");
        Ok(ApiResponse::success_with_message(vehiculo, "Vehículo actualizado exitosamente"))
    }

    /// Baja lógica, bloqueada si tiene órdenes activas
    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<ApiResponse<DeleteOutcome>, AppError> {
        AuthorizationService::require(user, Permiso::GestionarVehiculos)?;

        let outcome = eliminar_entidad(&self.pool, user.taller_id, Entidad::Vehiculo(id)).await?;
        Ok(ApiResponse::success_with_message(outcome, "Vehículo eliminado exitosamente"))
    }
}

async fn verificar_cliente(
    conn: &mut PgConnection,
    taller_id: Uuid,
    cliente_id: Option<Uuid>,
) -> Result<(), AppError> {
    let Some(cliente_id) = cliente_id else {
        return Ok(());
    };

    match ClienteRepository::find_by_id(conn, taller_id, cliente_id).await? {
        Some(_) => Ok(()),
        None => Err(validation_error("cliente_id", "El cliente no existe")),
    }
}
