use chrono::Utc;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::dto::ListFilters;
use crate::models::cliente::{Cliente, ClienteRequest, CLIENTE_UNIQUE_FIELDS};
use crate::utils::errors::{map_unique_violation, AppError};

pub struct ClienteRepository;

impl ClienteRepository {
    pub async fn create(
        conn: &mut PgConnection,
        taller_id: Uuid,
        request: &ClienteRequest,
    ) -> Result<Cliente, AppError> {
        let now = Utc::now();

        sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (id, taller_id, name, email, phone, address, document_number, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(taller_id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(&request.document_number)
        .bind(request.status)
        .bind(now)
        .fetch_one(conn)
        .await
        .map_err(|e| map_unique_violation(e, "Cliente", CLIENTE_UNIQUE_FIELDS))
    }

    pub async fn find_by_id(
        conn: &mut PgConnection,
        taller_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Cliente>, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>(
            "SELECT * FROM clientes WHERE id = $1 AND taller_id = $2",
        )
        .bind(id)
        .bind(taller_id)
        .fetch_optional(conn)
        .await?;

        Ok(cliente)
    }

    pub async fn list(
        conn: &mut PgConnection,
        taller_id: Uuid,
        filters: &ListFilters,
    ) -> Result<Vec<Cliente>, AppError> {
        let clientes = sqlx::query_as::<_, Cliente>(
            r#"
            SELECT * FROM clientes
            WHERE taller_id = $1
              AND ($2::bool IS NULL OR status = $2)
              AND ($3::text IS NULL OR name ILIKE $3 OR email ILIKE $3 OR document_number ILIKE $3)
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

        Ok(clientes)
    }

    /// Actualización de registro completo; `None` si no existe en el taller
    pub async fn update(
        conn: &mut PgConnection,
        taller_id: Uuid,
        id: Uuid,
        request: &ClienteRequest,
    ) -> Result<Option<Cliente>, AppError> {
        sqlx::query_as::<_, Cliente>(
            r#"
            UPDATE clientes
            SET name = $3, email = $4, phone = $5, address = $6, document_number = $7, status = $8, updated_at = $9
            WHERE id = $1 AND taller_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(taller_id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(&request.document_number)
        .bind(request.status)
        .bind(Utc::now())
        .fetch_optional(conn)
        .await
        .map_err(|e| map_unique_violation(e, "Cliente", CLIENTE_UNIQUE_FIELDS))
    }
}
