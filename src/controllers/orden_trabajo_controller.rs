use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::controllers::exigir_cliente;
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::auth::Permiso;
use crate::models::orden_trabajo::{CambiarEstadoRequest, OrdenFilters, OrdenTrabajo, OrdenTrabajoRequest};
use crate::models::servicio::Servicio;
use crate::repositories::cliente_repository::ClienteRepository;
use crate::repositories::empleado_repository::EmpleadoRepository;
use crate::repositories::orden_trabajo_repository::{OrdenData, OrdenTrabajoRepository};
use crate::repositories::servicio_repository::ServicioRepository;
use crate::repositories::vehiculo_repository::VehiculoRepository;
use crate::services::authorization_service::AuthorizationService;
use crate::services::integridad::check_orden_deletable;
use crate::services::orden_lifecycle::{
    apply_status_transition, resolve_amount_on_create, resolve_amount_on_update, EstadoFechas,
};
use crate::utils::errors::{not_found_error, validation_error, AppError};

pub struct OrdenTrabajoController {
    pool: PgPool,
}

impl OrdenTrabajoController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: OrdenTrabajoRequest,
    ) -> Result<ApiResponse<OrdenTrabajo>, AppError> {
        AuthorizationService::require(user, Permiso::GestionarOrdenes)?;
        request.validate()?;
        exigir_cliente(request.cliente_id, false)?;

        let mut tx = self.pool.begin().await?;

        let servicio = validar_referencias(&mut tx, user.taller_id, &request, None).await?;
        let total_amount = resolve_amount_on_create(request.total_amount, &servicio);
        let fechas = apply_status_transition(
            EstadoFechas {
                status: request.status,
                start_date: request.start_date,
                end_date: request.end_date,
            },
            request.status,
            Utc::now(),
        );

        let data = orden_data(&request, fechas, total_amount);
        let orden = OrdenTrabajoRepository::create(&mut tx, user.taller_id, &data).await?;
        tx.commit().await?;

        info!(
            orden_id = %orden.id,
            status = orden.status.as_str(),
            total_amount = %orden.total_amount,
            "🔧 Orden de trabajo creada"
        );
        Ok(ApiResponse::success_with_message(orden, "Orden de trabajo creada exitosamente"))
    }

    pub async fn get_by_id(&self, user: &AuthenticatedUser, id: Uuid) -> Result<OrdenTrabajo, AppError> {
        AuthorizationService::require(user, Permiso::VerOrdenes)?;

        let mut conn = self.pool.acquire().await?;
        OrdenTrabajoRepository::find_by_id(&mut conn, user.taller_id, id)
            .await?
            .ok_or_else(|| not_found_error("Orden de trabajo", &id.to_string()))
    }

    pub async fn list(&self, user: &AuthenticatedUser, filters: OrdenFilters) -> Result<Vec<OrdenTrabajo>, AppError> {
        AuthorizationService::require(user, Permiso::VerOrdenes)?;

        let mut conn = self.pool.acquire().await?;
        OrdenTrabajoRepository::list(&mut conn, user.taller_id, &filters).await
    }

    /// Actualización del registro completo. Las fechas omitidas conservan
    /// su valor actual; una orden desvinculada de su cliente admite
    /// `cliente_id` en `null` y sigue desvinculada.
    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: OrdenTrabajoRequest,
    ) -> Result<ApiResponse<OrdenTrabajo>, AppError> {
        AuthorizationService::require(user, Permiso::GestionarOrdenes)?;
        request.validate()?;

        let mut tx = self.pool.begin().await?;

        let actual = OrdenTrabajoRepository::find_by_id(&mut tx, user.taller_id, id)
            .await?
            .ok_or_else(|| not_found_error("Orden de trabajo", &id.to_string()))?;

        exigir_cliente(request.cliente_id, actual.cliente_id.is_none())?;
        let servicio = validar_referencias(&mut tx, user.taller_id, &request, Some(&actual)).await?;
        let total_amount = resolve_amount_on_update(&actual, &servicio, request.total_amount);
        let fechas = apply_status_transition(
            EstadoFechas {
                status: actual.status,
                start_date: request.start_date.or(actual.start_date),
                end_date: request.end_date.or(actual.end_date),
            },
            request.status,
            Utc::now(),
        );

        let data = orden_data(&request, fechas, total_amount);
        let orden = OrdenTrabajoRepository::update(&mut tx, user.taller_id, id, &data)
            .await?
            .ok_or_else(|| not_found_error("Orden de trabajo", &id.to_string()))?;
        tx.commit().await?;

        info!(
            orden_id = %id,
            from = actual.status.as_str(),
            to = orden.status.as_str(),
            "✏️ Orden de trabajo actualizada"
        );
        Ok(ApiResponse::success_with_message(orden, "Orden de trabajo actualizada exitosamente"))
    }

    /// Cambia solo el estado, con sus efectos sobre las fechas
    pub async fn cambiar_estado(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: CambiarEstadoRequest,
    ) -> Result<ApiResponse<OrdenTrabajo>, AppError> {
        AuthorizationService::require(user, Permiso::CambiarEstadoOrden)?;

        let mut tx = self.pool.begin().await?;

        let actual = OrdenTrabajoRepository::find_by_id(&mut tx, user.taller_id, id)
            .await?
            .ok_or_else(|| not_found_error("Orden de trabajo", &id.to_string()))?;

        let fechas = apply_status_transition(EstadoFechas::from(&actual), request.status, Utc::now());
        let orden = OrdenTrabajoRepository::update_status(&mut tx, user.taller_id, id, fechas)
            .await?
            .ok_or_else(|| not_found_error("Orden de trabajo", &id.to_string()))?;
        tx.commit().await?;

        info!(
            orden_id = %id,
            from = actual.status.as_str(),
            to = orden.status.as_str(),
            "🔄 Estado de orden actualizado"
        );
        Ok(ApiResponse::success_with_message(orden, "Estado actualizado exitosamente"))
    }

    /// Solo se eliminan órdenes pendientes
    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        AuthorizationService::require(user, Permiso::GestionarOrdenes)?;

        let mut tx = self.pool.begin().await?;

        let orden = OrdenTrabajoRepository::find_by_id(&mut tx, user.taller_id, id)
            .await?
            .ok_or_else(|| not_found_error("Orden de trabajo", &id.to_string()))?;

        let check = check_orden_deletable(&orden);
        if !check.allowed {
            warn!(orden_id = %id, status = orden.status.as_str(), "🚫 eliminación de orden bloqueada");
        }
        check.into_result()?;

        OrdenTrabajoRepository::delete(&mut tx, user.taller_id, id).await?;
        tx.commit().await?;

        info!(orden_id = %id, "🗑️ Orden de trabajo eliminada");
        Ok(ApiResponse::message("Orden de trabajo eliminada exitosamente"))
    }
}

fn orden_data<'a>(
    request: &'a OrdenTrabajoRequest,
    fechas: EstadoFechas,
    total_amount: Decimal,
) -> OrdenData<'a> {
    OrdenData {
        cliente_id: request.cliente_id,
        vehiculo_id: request.vehiculo_id,
        empleado_id: request.empleado_id,
        servicio_id: request.servicio_id,
        description: request.description.trim(),
        status: fechas.status,
        total_amount,
        start_date: fechas.start_date,
        end_date: fechas.end_date,
    }
}

/// Verifica que cliente, vehículo, empleado y servicio existan en el taller
/// y devuelve el servicio (su precio resuelve el monto). Sin cliente (orden
/// desvinculada) no se chequea el dueño del vehículo.
///
/// Empleados y servicios dados de baja no se aceptan, salvo que la orden
/// actual ya los tenga asignados.
async fn validar_referencias(
    conn: &mut PgConnection,
    taller_id: Uuid,
    request: &OrdenTrabajoRequest,
    actual: Option<&OrdenTrabajo>,
) -> Result<Servicio, AppError> {
    if let Some(cliente_id) = request.cliente_id {
        if ClienteRepository::find_by_id(conn, taller_id, cliente_id).await?.is_none() {
            return Err(validation_error("cliente_id", "El cliente no existe"));
        }
    }

    let vehiculo = VehiculoRepository::find_by_id(conn, taller_id, request.vehiculo_id)
        .await?
        .ok_or_else(|| validation_error("vehiculo_id", "El vehículo no existe"))?;
    if let (Some(owner), Some(cliente_id)) = (vehiculo.cliente_id, request.cliente_id) {
        if owner != cliente_id {
            return Err(validation_error("vehiculo_id", "El vehículo no pertenece al cliente"));
        }
    }

    let empleado = EmpleadoRepository::find_by_id(conn, taller_id, request.empleado_id)
        .await?
        .ok_or_else(|| validation_error("empleado_id", "El empleado no existe"))?;
    if !empleado.status && actual.map(|o| o.empleado_id) != Some(empleado.id) {
        return Err(validation_error("empleado_id", "El empleado está inactivo"));
    }

    let servicio = ServicioRepository::find_by_id(conn, taller_id, request.servicio_id)
        .await?
        .ok_or_else(|| validation_error("servicio_id", "El servicio no existe"))?;
    if !servicio.status && actual.map(|o| o.servicio_id) != Some(servicio.id) {
        return Err(validation_error("servicio_id", "El servicio está inactivo"));
    }

    Ok(servicio)
}
