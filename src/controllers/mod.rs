//! Controladores
//!
//! Validan la request, verifican el permiso del usuario y ejecutan cada
//! escritura dentro de una transacción: commit al final, rollback al
//! soltarla ante cualquier error.

pub mod cliente_controller;
pub mod dashboard_controller;
pub mod empleado_controller;
pub mod orden_trabajo_controller;
pub mod reporte_controller;
pub mod servicio_controller;
pub mod vehiculo_controller;

use sqlx::PgPool;
use uuid::Uuid;

use crate::repositories::integridad_repository::PgIntegrityStore;
use crate::services::integridad::{self, DeleteOutcome, Entidad};
use crate::utils::errors::{validation_error, AppResult};

/// Elimina una entidad padre aplicando las reglas de integridad en una
/// sola transacción
pub(crate) async fn eliminar_entidad(pool: &PgPool, taller_id: Uuid, entidad: Entidad) -> AppResult<DeleteOutcome> {
    let mut tx = pool.begin().await?;

    let outcome = {
        let mut store = PgIntegrityStore::new(&mut tx, taller_id);
        integridad::delete_entity(&mut store, entidad).await?
    };

    tx.commit().await?;
    Ok(outcome)
}

/// `cliente_id` es obligatorio salvo en registros que el borrado de su
/// cliente dejó desvinculados; esos se pueden actualizar sin reasignarlos.
pub(crate) fn exigir_cliente(solicitado: Option<Uuid>, desvinculado: bool) -> AppResult<Option<Uuid>> {
    match solicitado {
        Some(id) => Ok(Some(id)),
        None if desvinculado => Ok(None),
        None => Err(validation_error("cliente_id", "El cliente es obligatorio")),
    }
}
