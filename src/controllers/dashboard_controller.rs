use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;

use crate::middleware::auth::AuthenticatedUser;
use crate::models::auth::Permiso;
use crate::models::orden_trabajo::EstadoOrden;
use crate::models::reporte::{ConteoEstado, DashboardSummary};
use crate::repositories::reporte_repository::ReporteRepository;
use crate::services::authorization_service::AuthorizationService;
use crate::utils::errors::AppError;

const ORDENES_RECIENTES: i64 = 10;

pub struct DashboardController {
    pool: PgPool,
}

impl DashboardController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn summary(&self, user: &AuthenticatedUser) -> Result<DashboardSummary, AppError> {
        AuthorizationService::require(user, Permiso::VerDashboard)?;

        let mut conn = self.pool.acquire().await?;
        let taller_id = user.taller_id;

        let entidades = ReporteRepository::conteo_entidades(&mut conn, taller_id).await?;
        let ordenes_por_estado =
            completar_conteos(ReporteRepository::ordenes_por_estado(&mut conn, taller_id).await?);
        let (ingresos_totales, ingresos_mes) = ReporteRepository::ingresos(&mut conn, taller_id).await?;
        let ordenes_recientes = ReporteRepository::ordenes_recientes(&mut conn, taller_id, ORDENES_RECIENTES).await?;

        let ordenes_activas: i64 = ordenes_por_estado
            .iter()
            .filter(|c| c.status.is_active())
            .map(|c| c.total)
            .sum();

        debug!(%taller_id, ordenes_activas, "📊 Dashboard calculado");

        Ok(DashboardSummary {
            taller_id,
            generated_at: Utc::now(),
            clientes_activos: entidades.clientes,
            vehiculos_activos: entidades.vehiculos,
            empleados_activos: entidades.empleados,
            servicios_activos: entidades.servicios,
            ordenes_por_estado,
            ordenes_activas,
            ingresos_totales,
            ingresos_mes,
            ordenes_recientes,
        })
    }
}

/// Un conteo por cada estado, en orden fijo, con 0 para los ausentes
fn completar_conteos(conteos: Vec<ConteoEstado>) -> Vec<ConteoEstado> {
    EstadoOrden::ALL
        .iter()
        .map(|&status| ConteoEstado {
            status,
            total: conteos
                .iter()
                .find(|c| c.status == status)
                .map(|c| c.total)
                .unwrap_or(0),
        })
        .collect()
}
