use chrono::Utc;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::dto::ListFilters;
use crate::models::empleado::{Empleado, EmpleadoRequest, EMPLEADO_UNIQUE_FIELDS};
use crate::utils::errors::{map_unique_violation, AppError};

pub struct EmpleadoRepository;

impl EmpleadoRepository {
    pub async fn create(
        conn: &mut PgConnection,
        taller_id: Uuid,
        request: &EmpleadoRequest,
    ) -> Result<Empleado, AppError> {
        let now = Utc::now();

        sqlx::query_as::<_, Empleado>(
            r#"
            INSERT INTO empleados (id, taller_id, name, email, phone, position, salary, hire_date, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(taller_id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.position)
        .bind(request.salary)
        .bind(request.hire_date)
        .bind(request.status)
        .bind(now)
        .fetch_one(conn)
        .await
        .map_err(|e| map_unique_violation(e, "Empleado", EMPLEADO_UNIQUE_FIELDS))
    }

    pub async fn find_by_id(
        conn: &mut PgConnection,
        taller_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Empleado>, AppError> {
        let empleado = sqlx::query_as::<_, Empleado>(
            "SELECT * FROM empleados WHERE id = $1 AND taller_id = $2",
        )
        .bind(id)
        .bind(taller_id)
        .fetch_optional(conn)
        .await?;

        Ok(empleado)
    }

    pub async fn list(
        conn: &mut PgConnection,
        taller_id: Uuid,
        filters: &ListFilters,
    ) -> Result<Vec<Empleado>, AppError> {
        let empleados = sqlx::query_as::<_, Empleado>(
            r#"
            SELECT * FROM empleados
            WHERE taller_id = $1
              AND ($2::bool IS NULL OR status = $2)
              AND ($3::text IS NULL OR name ILIKE $3 OR email ILIKE $3 OR position ILIKE $3)
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

        Ok(empleados)
    }

    pub async fn update(
        conn: &mut PgConnection,
        taller_id: Uuid,
        id: Uuid,
        request: &EmpleadoRequest,
    ) -> Result<Option<Empleado>, AppError> {
        sqlx::query_as::<_, Empleado>(
            r#"
            UPDATE empleados
            SET name = $3, email = $4, phone = $5, position = $6, salary = $7, hire_date = $8,
                status = $9, updated_at = $10
            WHERE id = $1 AND taller_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(taller_id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.position)
        .bind(request.salary)
        .bind(request.hire_date)
        .bind(request.status)
        .bind(Utc::now())
        .fetch_optional(conn)
        .await
        .map_err(|e| map_unique_violation(e, "Empleado", EMPLEADO_UNIQUE_FIELDS))
    }
}
