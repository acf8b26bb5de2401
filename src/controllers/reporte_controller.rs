use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::middleware::auth::AuthenticatedUser;
use crate::models::auth::Permiso;
use crate::models::orden_trabajo::EstadoOrden;
use crate::models::reporte::{DesempenoEmpleado, IngresoPorServicio, OrdenReporte, Reporte, ReporteFilters};
use crate::repositories::reporte_repository::ReporteRepository;
use crate::services::authorization_service::AuthorizationService;
use crate::utils::errors::{validation_error, AppError};

/// Query del reporte de órdenes
#[derive(Debug, Default, Deserialize)]
pub struct OrdenesReporteQuery {
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
    pub status: Option<EstadoOrden>,
}

pub struct ReporteController {
    pool: PgPool,
}

impl ReporteController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ingresos de órdenes completadas agrupados por servicio
    pub async fn ingresos(
        &self,
        user: &AuthenticatedUser,
        filters: ReporteFilters,
    ) -> Result<Reporte<IngresoPorServicio>, AppError> {
        AuthorizationService::require(user, Permiso::VerReportes)?;
        validar_rango(&filters)?;

        let mut conn = self.pool.acquire().await?;
        let filas = ReporteRepository::ingresos_por_servicio(&mut conn, user.taller_id, &filters).await?;
        let total: Decimal = filas.iter().map(|f| f.total).sum();

        info!(taller_id = %user.taller_id, servicios = filas.len(), "📈 Reporte de ingresos generado");
        Ok(reporte(filters, filas, total))
    }

    pub async fn empleados(
        &self,
        user: &AuthenticatedUser,
        filters: ReporteFilters,
    ) -> Result<Reporte<DesempenoEmpleado>, AppError> {
        AuthorizationService::require(user, Permiso::VerReportes)?;
        validar_rango(&filters)?;

        let mut conn = self.pool.acquire().await?;
        let filas = ReporteRepository::desempeno_empleados(&mut conn, user.taller_id, &filters).await?;
        let total: Decimal = filas.iter().map(|f| f.total_facturado).sum();

        info!(taller_id = %user.taller_id, empleados = filas.len(), "📈 Reporte de empleados generado");
        Ok(reporte(filters, filas, total))
    }

    /// Listado detallado de órdenes; `total` suma todas las filas devueltas
    pub async fn ordenes(
        &self,
        user: &AuthenticatedUser,
        query: OrdenesReporteQuery,
    ) -> Result<Reporte<OrdenReporte>, AppError> {
        AuthorizationService::require(user, Permiso::VerReportes)?;
        let rango = ReporteFilters {
            desde: query.desde,
            hasta: query.hasta,
        };
        validar_rango(&rango)?;

        let mut conn = self.pool.acquire().await?;
        let filas = ReporteRepository::ordenes(&mut conn, user.taller_id, &rango, query.status).await?;
        let total: Decimal = filas.iter().map(|f| f.total_amount).sum();

        info!(taller_id = %user.taller_id, ordenes = filas.len(), "📈 Reporte de órdenes generado");
        Ok(reporte(rango, filas, total))
    }
}

fn validar_rango(filters: &ReporteFilters) -> Result<(), AppError> {
    match (filters.desde, filters.hasta) {
        (Some(desde), Some(hasta)) if desde > hasta => Err(validation_error(
            "desde",
            "La fecha inicial no puede ser posterior a la final",
        )),
        _ => Ok(()),
    }
}

fn reporte<T>(filters: ReporteFilters, filas: Vec<T>, total: Decimal) -> Reporte<T> {
    Reporte {
        desde: filters.desde,
        hasta: filters.hasta,
        generated_at: Utc::now(),
        filas,
        total,
    }
}
