use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::dto::filtros::clamp_limit;
use crate::models::orden_trabajo::{EstadoOrden, OrdenFilters, OrdenTrabajo};
use crate::services::orden_lifecycle::EstadoFechas;
use crate::utils::errors::AppError;

/// Valores ya resueltos (monto, fechas) de una orden a persistir
#[derive(Debug, Clone)]
pub struct OrdenData<'a> {
    pub cliente_id: Option<Uuid>,
    pub vehiculo_id: Uuid,
    pub empleado_id: Uuid,
    pub servicio_id: Uuid,
    pub description: &'a str,
    pub status: EstadoOrden,
    pub total_amount: Decimal,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

pub struct OrdenTrabajoRepository;

impl OrdenTrabajoRepository {
    pub async fn create(
        conn: &mut PgConnection,
        taller_id: Uuid,
        data: &OrdenData<'_>,
    ) -> Result<OrdenTrabajo, AppError> {
        let now = Utc::now();

        let orden = sqlx::query_as::<_, OrdenTrabajo>(
            r#"
            INSERT INTO orden_trabajos (id, taller_id, cliente_id, vehiculo_id, empleado_id, servicio_id,
                description, status, total_amount, start_date, end_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(taller_id)
        .bind(data.cliente_id)
        .bind(data.vehiculo_id)
        .bind(data.empleado_id)
        .bind(data.servicio_id)
        .bind(data.description)
        .bind(data.status)
        .bind(data.total_amount)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(now)
        .fetch_one(conn)
        .await?;

        Ok(orden)
    }

    pub async fn find_by_id(
        conn: &mut PgConnection,
        taller_id: Uuid,
        id: Uuid,
    ) -> Result<Option<OrdenTrabajo>, AppError> {
        let orden = sqlx::query_as::<_, OrdenTrabajo>(
            "SELECT * FROM orden_trabajos WHERE id = $1 AND taller_id = $2",
        )
        .bind(id)
        .bind(taller_id)
        .fetch_optional(conn)
        .await?;

        Ok(orden)
    }

    pub async fn list(
        conn: &mut PgConnection,
        taller_id: Uuid,
        filters: &OrdenFilters,
    ) -> Result<Vec<OrdenTrabajo>, AppError> {
        let ordenes = sqlx::query_as::<_, OrdenTrabajo>(
            r#"
            SELECT * FROM orden_trabajos
            WHERE taller_id = $1
              AND ($2::orden_estado IS NULL OR status = $2)
              AND ($3::uuid IS NULL OR cliente_id = $3)
              AND ($4::uuid IS NULL OR vehiculo_id = $4)
              AND ($5::uuid IS NULL OR empleado_id = $5)
              AND ($6::uuid IS NULL OR servicio_id = $6)
              AND ($7::date IS NULL OR created_at >= $7::date)
              AND ($8::date IS NULL OR created_at < $8::date + 1)
            ORDER BY created_at DESC
            LIMIT $9 OFFSET $10
            "#,
        )
        .bind(taller_id)
        .bind(filters.status)
        .bind(filters.cliente_id)
        .bind(filters.vehiculo_id)
        .bind(filters.empleado_id)
        .bind(filters.servicio_id)
        .bind(filters.desde)
        .bind(filters.hasta)
        .bind(clamp_limit(filters.limit))
        .bind(filters.offset.unwrap_or(0).max(0))
        .fetch_all(conn)
        .await?;

        Ok(ordenes)
    }

    pub async fn update(
        conn: &mut PgConnection,
        taller_id: Uuid,
        id: Uuid,
        data: &OrdenData<'_>,
    ) -> Result<Option<OrdenTrabajo>, AppError> {
        let orden = sqlx::query_as::<_, OrdenTrabajo>(
            r#"
            UPDATE orden_trabajos
            SET cliente_id = $3, vehiculo_id = $4, empleado_id = $5, servicio_id = $6, description = $7,
                status = $8, total_amount = $9, start_date = $10, end_date = $11, updated_at = $12
            WHERE id = $1 AND taller_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(taller_id)
        .bind(data.cliente_id)
        .bind(data.vehiculo_id)
        .bind(data.empleado_id)
        .bind(data.servicio_id)
        .bind(data.description)
        .bind(data.status)
        .bind(data.total_amount)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(Utc::now())
        .fetch_optional(conn)
        .await?;

        Ok(orden)
    }

    /// Persiste el resultado de una transición de estado
    pub async fn update_status(
        conn: &mut PgConnection,
        taller_id: Uuid,
        id: Uuid,
        fechas: EstadoFechas,
    ) -> Result<Option<OrdenTrabajo>, AppError> {
        let orden = sqlx::query_as::<_, OrdenTrabajo>(
            r#"
            UPDATE orden_trabajos
            SET status = $3, start_date = $4, end_date = $5, updated_at = $6
            WHERE id = $1 AND taller_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(taller_id)
        .bind(fechas.status)
        .bind(fechas.start_date)
        .bind(fechas.end_date)
        .bind(Utc::now())
        .fetch_optional(conn)
        .await?;

        Ok(orden)
    }

    pub async fn delete(conn: &mut PgConnection, taller_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM orden_trabajos WHERE id = $1 AND taller_id = $2")
            .bind(id)
            .bind(taller_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
