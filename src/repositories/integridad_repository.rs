//! Implementación PostgreSQL de `IntegrityStore` sobre una conexión
//! (normalmente la transacción abierta por el controlador).

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::services::integridad::{DeleteMode, Entidad, IntegrityStore, UnlinkSummary};
use crate::utils::errors::AppResult;

pub struct PgIntegrityStore<'c> {
    conn: &'c mut PgConnection,
    taller_id: Uuid,
}

impl<'c> PgIntegrityStore<'c> {
    pub fn new(conn: &'c mut PgConnection, taller_id: Uuid) -> Self {
        Self { conn, taller_id }
    }
}

#[async_trait]
impl<'c> IntegrityStore for PgIntegrityStore<'c> {
    async fn count_active_orders(&mut self, entidad: Entidad) -> AppResult<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM orden_trabajos \
             WHERE taller_id = $1 AND {} = $2 AND status IN ('pending', 'in_progress')",
            entidad.columna_orden()
        );

        let (count,): (i64,) = sqlx::query_as(&sql)
            .bind(self.taller_id)
            .bind(entidad.id())
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }

    async fn unlink_cliente(&mut self, cliente_id: Uuid) -> AppResult<UnlinkSummary> {
        let now = Utc::now();

        let vehiculos = sqlx::query(
            "UPDATE vehiculos SET cliente_id = NULL, updated_at = $3 WHERE taller_id = $1 AND cliente_id = $2",
        )
        .bind(self.taller_id)
        .bind(cliente_id)
        .bind(now)
        .execute(&mut *self.conn)
        .await?;

        let ordenes = sqlx::query(
            r#"
            UPDATE orden_trabajos SET cliente_id = NULL, updated_at = $3
            WHERE taller_id = $1 AND cliente_id = $2 AND status IN ('completed', 'cancelled')
            "#,
        )
        .bind(self.taller_id)
        .bind(cliente_id)
        .bind(now)
        .execute(&mut *self.conn)
        .await?;

        Ok(UnlinkSummary {
            vehiculos: vehiculos.rows_affected(),
            ordenes: ordenes.rows_affected(),
        })
    }

    async fn remove(&mut self, entidad: Entidad, mode: DeleteMode) -> AppResult<bool> {
        let result = match mode {
            DeleteMode::Hard => {
                let sql = format!("DELETE FROM {} WHERE id = $1 AND taller_id = $2", entidad.tabla());
                sqlx::query(&sql)
                    .bind(entidad.id())
                    .bind(self.taller_id)
                    .execute(&mut *self.conn)
                    .await?
            }
            DeleteMode::Soft => {
                let sql = format!(
                    "UPDATE {} SET status = FALSE, updated_at = $3 WHERE id = $1 AND taller_id = $2",
                    entidad.tabla()
                );
                sqlx::query(&sql)
                    .bind(entidad.id())
                    .bind(self.taller_id)
                    .bind(Utc::now())
                    .execute(&mut *self.conn)
                    .await?
            }
        };

        Ok(result.rows_affected() > 0)
    }
}
