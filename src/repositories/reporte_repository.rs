//! Consultas de agregación para dashboard y reportes (solo lectura)

use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::orden_trabajo::EstadoOrden;
use crate::models::reporte::{
    ConteoEstado, DesempenoEmpleado, IngresoPorServicio, OrdenReporte, OrdenResumen, ReporteFilters,
};
use crate::utils::errors::AppError;

/// Entidades activas del taller
#[derive(Debug, Clone, Copy, Default)]
pub struct ConteoEntidades {
    pub clientes: i64,
    pub vehiculos: i64,
    pub empleados: i64,
    pub servicios: i64,
}

pub struct ReporteRepository;

impl ReporteRepository {
    pub async fn conteo_entidades(conn: &mut PgConnection, taller_id: Uuid) -> Result<ConteoEntidades, AppError> {
        let (clientes, vehiculos, empleados, servicios): (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM clientes WHERE taller_id = $1 AND status),
                (SELECT COUNT(*) FROM vehiculos WHERE taller_id = $1 AND status),
                (SELECT COUNT(*) FROM empleados WHERE taller_id = $1 AND status),
                (SELECT COUNT(*) FROM servicios WHERE taller_id = $1 AND status)
            "#,
        )
        .bind(taller_id)
        .fetch_one(conn)
        .await?;

        Ok(ConteoEntidades {
            clientes,
            vehiculos,
            empleados,
            servicios,
        })
    }

    pub async fn ordenes_por_estado(conn: &mut PgConnection, taller_id: Uuid) -> Result<Vec<ConteoEstado>, AppError> {
        let conteos = sqlx::query_as::<_, ConteoEstado>(
            r#"
            SELECT status, COUNT(*) AS total
            FROM orden_trabajos
            WHERE taller_id = $1
            GROUP BY status
            "#,
        )
        .bind(taller_id)
        .fetch_all(conn)
        .await?;

        Ok(conteos)
    }

    /// (total histórico, total del mes en curso) de órdenes completadas
    pub async fn ingresos(conn: &mut PgConnection, taller_id: Uuid) -> Result<(Decimal, Decimal), AppError> {
        let ingresos: (Decimal, Decimal) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(total_amount), 0),
                COALESCE(SUM(total_amount) FILTER (WHERE end_date >= date_trunc('month', NOW())), 0)
            FROM orden_trabajos
            WHERE taller_id = $1 AND status = 'completed'
            "#,
        )
        .bind(taller_id)
        .fetch_one(conn)
        .await?;

        Ok(ingresos)
    }

    pub async fn ordenes_recientes(
        conn: &mut PgConnection,
        taller_id: Uuid,
        limit: i64,
    ) -> Result<Vec<OrdenResumen>, AppError> {
        let ordenes = sqlx::query_as::<_, OrdenResumen>(
            r#"
            SELECT o.id, c.name AS cliente_name, v.license_plate, s.name AS servicio_name,
                   e.name AS empleado_name, o.status, o.total_amount, o.created_at
            FROM orden_trabajos o
            LEFT JOIN clientes c ON c.id = o.cliente_id
            JOIN vehiculos v ON v.id = o.vehiculo_id
            JOIN servicios s ON s.id = o.servicio_id
            JOIN empleados e ON e.id = o.empleado_id
            WHERE o.taller_id = $1
            ORDER BY o.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(taller_id)
        .bind(limit)
        .fetch_all(conn)
        .await?;

        Ok(ordenes)
    }

    pub async fn ingresos_por_servicio(
        conn: &mut PgConnection,
        taller_id: Uuid,
        filters: &ReporteFilters,
    ) -> Result<Vec<IngresoPorServicio>, AppError> {
        let filas = sqlx::query_as::<_, IngresoPorServicio>(
            r#"
            SELECT s.id AS servicio_id, s.name AS servicio_name,
                   COUNT(o.id) AS ordenes,
                   COALESCE(SUM(o.total_amount), 0) AS total,
                   COALESCE(ROUND(AVG(o.total_amount), 2), 0) AS promedio
            FROM orden_trabajos o
            JOIN servicios s ON s.id = o.servicio_id
            WHERE o.taller_id = $1
              AND o.status = 'completed'
              AND ($2::date IS NULL OR o.created_at >= $2::date)
              AND ($3::date IS NULL OR o.created_at < $3::date + 1)
            GROUP BY s.id, s.name
            ORDER BY total DESC
            "#,
        )
        .bind(taller_id)
        .bind(filters.desde)
        .bind(filters.hasta)
        .fetch_all(conn)
        .await?;

        Ok(filas)
    }

    pub async fn desempeno_empleados(
        conn: &mut PgConnection,
        taller_id: Uuid,
        filters: &ReporteFilters,
    ) -> Result<Vec<DesempenoEmpleado>, AppError> {
        let filas = sqlx::query_as::<_, DesempenoEmpleado>(
            r#"
            SELECT e.id AS empleado_id, e.name AS empleado_name,
                   COUNT(o.id) AS ordenes_asignadas,
                   COUNT(o.id) FILTER (WHERE o.status = 'completed') AS ordenes_completadas,
                   COALESCE(SUM(o.total_amount) FILTER (WHERE o.status = 'completed'), 0) AS total_facturado
            FROM empleados e
            LEFT JOIN orden_trabajos o
                   ON o.empleado_id = e.id
                  AND ($2::date IS NULL OR o.created_at >= $2::date)
                  AND ($3::date IS NULL OR o.created_at < $3::date + 1)
            WHERE e.taller_id = $1
            GROUP BY e.id, e.name
            ORDER BY total_facturado DESC, e.name ASC
            "#,
        )
        .bind(taller_id)
        .bind(filters.desde)
        .bind(filters.hasta)
        .fetch_all(conn)
        .await?;

        Ok(filas)
    }

    pub async fn ordenes(
        conn: &mut PgConnection,
        taller_id: Uuid,
        filters: &ReporteFilters,
        status: Option<EstadoOrden>,
    ) -> Result<Vec<OrdenReporte>, AppError> {
        let filas = sqlx::query_as::<_, OrdenReporte>(
            r#"
            SELECT o.id, c.name AS cliente_name, c.document_number AS cliente_document,
                   (v.brand || ' ' || v.model || ' ' || v.year) AS vehiculo, v.license_plate,
                   e.name AS empleado_name, s.name AS servicio_name, o.description,
                   o.status, o.total_amount, o.start_date, o.end_date, o.created_at
            FROM orden_trabajos o
            LEFT JOIN clientes c ON c.id = o.cliente_id
            JOIN vehiculos v ON v.id = o.vehiculo_id
            JOIN empleados e ON e.id = o.empleado_id
            JOIN servicios s ON s.id = o.servicio_id
            WHERE o.taller_id = $1
              AND ($2::date IS NULL OR o.created_at >= $2::date)
              AND ($3::date IS NULL OR o.created_at < $3::date + 1)
              AND ($4::orden_estado IS NULL OR o.status = $4)
            ORDER BY o.created_at ASC
            "#,
        )
        .bind(taller_id)
        .bind(filters.desde)
        .bind(filters.hasta)
        .bind(status)
        .fetch_all(conn)
        .await?;

        Ok(filas)
    }
}
