use chrono::Utc;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::dto::ListFilters;
use crate::models::vehiculo::{Vehiculo, VehiculoRequest, VEHICULO_UNIQUE_FIELDS};
use crate::utils::errors::{map_unique_violation, AppError};

pub struct VehiculoRepository;

impl VehiculoRepository {
    pub async fn create(
        conn: &mut PgConnection,
        taller_id: Uuid,
        request: &VehiculoRequest,
    ) -> Result<Vehiculo, AppError> {
        let now = Utc::now();

        sqlx::query_as::<_, Vehiculo>(
            r#"
            INSERT INTO vehiculos (id, taller_id, cliente_id, brand, model, year, license_plate, vin, color, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(taller_id)
        .bind(request.cliente_id)
        .bind(&request.brand)
        .bind(&request.model)
        .bind(request.year)
        .bind(&request.license_plate)
        .bind(&request.vin)
        .bind(&request.color)
        .bind(request.status)
        .bind(now)
        .fetch_one(conn)
        .await
        .map_err(|e| map_unique_violation(e, "Vehículo", VEHICULO_UNIQUE_FIELDS))
    }

    pub async fn find_by_id(
        conn: &mut PgConnection,
        taller_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Vehiculo>, AppError> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>(
            "SELECT * FROM vehiculos WHERE id = $1 AND taller_id = $2",
        )
        .bind(id)
        .bind(taller_id)
        .fetch_optional(conn)
        .await?;

        Ok(vehiculo)
    }

    pub async fn list(
        conn: &mut PgConnection,
        taller_id: Uuid,
        filters: &ListFilters,
    ) -> Result<Vec<Vehiculo>, AppError> {
        let vehiculos = sqlx::query_as::<_, Vehiculo>(
            r#"
            SELECT * FROM vehiculos
            WHERE taller_id = $1
              AND ($2::bool IS NULL OR status = $2)
              AND ($3::text IS NULL OR license_plate ILIKE $3 OR vin ILIKE $3 OR brand ILIKE $3 OR model ILIKE $3)
            ORDER BY created_at DESC
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

        Ok(vehiculos)
    }

    pub async fn find_by_cliente(
        conn: &mut PgConnection,
        taller_id: Uuid,
        cliente_id: Uuid,
    ) -> Result<Vec<Vehiculo>, AppError> {
        let vehiculos = sqlx::query_as::<_, Vehiculo>(
            r#"
            SELECT * FROM vehiculos
            WHERE taller_id = $1 AND cliente_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(taller_id)
        .bind(cliente_id)
        .fetch_all(conn)
        .await?;

        Ok(vehiculos)
    }

    pub async fn update(
        conn: &mut PgConnection,
        taller_id: Uuid,
        id: Uuid,
        request: &VehiculoRequest,
    ) -> Result<Option<Vehiculo>, AppError> {
        sqlx::query_as::<_, Vehiculo>(
            r#"
            UPDATE vehiculos
            SET cliente_id = $3, brand = $4, model = $5, year = $6, license_plate = $7, vin = $8,
                color = $9, status = $10, updated_at = $11
            WHERE id = $1 AND taller_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(taller_id)
        .bind(request.cliente_id)
        .bind(&request.brand)
        .bind(&request.model)
        .bind(request.year)
        .bind(&request.license_plate)
        .bind(&request.vin)
        .bind(&request.color)
        .bind(request.status)
        .bind(Utc::now())
        .fetch_optional(conn)
        .await
        .map_err(|e| map_unique_violation(e, "Vehículo", VEHICULO_UNIQUE_FIELDS))
    }
}
