use chrono::Utc;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::dto::ListFilters;
use crate::models::servicio::{Servicio, ServicioRequest};
use crate::utils::errors::AppError;

pub struct ServicioRepository;

impl ServicioRepository {
    pub async fn create(
        conn: &mut PgConnection,
        taller_id: Uuid,
        request: &ServicioRequest,
    ) -> Result<Servicio, AppError> {
        let now = Utc::now();

        let servicio = sqlx::query_as::<_, Servicio>(
            r#"
            INSERT INTO servicios (id, taller_id, name, description, price, duration_hours, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(taller_id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .bind(request.duration_hours)
        .bind(request.status)
        .bind(now)
        .fetch_one(conn)
        .await?;

        Ok(servicio)
    }

    pub async fn find_by_id(
        conn: &mut PgConnection,
        taller_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Servicio>, AppError> {
        let servicio = sqlx::query_as::<_, Servicio>(
            "SELECT * FROM servicios WHERE id = $1 AND taller_id = $2",
        )
        .bind(id)
        .bind(taller_id)
        .fetch_optional(conn)
        .await?;

        Ok(servicio)
    }

    pub async fn list(
        conn: &mut PgConnection,
        taller_id: Uuid,
        filters: &ListFilters,
    ) -> Result<Vec<Servicio>, AppError> {
        let servicios = sqlx::query_as::<_, Servicio>(
            r#"
            SELECT * FROM servicios
            WHERE taller_id = $1
              AND ($2::bool IS NULL OR status = $2)
              AND ($3::text IS NULL OR name ILIKE $3 OR description ILIKE $3)
            ORDER BY name ASC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(taller_id)
        .bind(filters.status)
        .bind(filters.search_pattern())
        .bind(filters.limit())
        .bind(filters.offset())
        .fetch_all(conn)
        .await?;

        Ok(servicios)
    }

    pub async fn update(
        conn: &mut PgConnection,
        taller_id: Uuid,
        id: Uuid,
        request: &ServicioRequest,
    ) -> Result<Option<Servicio>, AppError> {
        let servicio = sqlx::query_as::<_, Servicio>(
            r#"
            UPDATE servicios
            SET name = $3, description = $4, price = $5, duration_hours = $6, status = $7, updated_at = $8
            WHERE id = $1 AND taller_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(taller_id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .bind(request.duration_hours)
        .bind(request.status)
        .bind(Utc::now())
        .fetch_optional(conn)
        .await?;

        Ok(servicio)
    }
}
