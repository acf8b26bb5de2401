//! Reglas de integridad referencial entre clientes, vehículos, empleados,
//! servicios y órdenes de trabajo.
//!
//! Ninguna entidad con órdenes activas (`pending`, `in_progress`) puede
//! eliminarse. Al eliminar un cliente, sus vehículos y sus órdenes cerradas
//! se desvinculan (`cliente_id = NULL`) para conservar el historial.
//!
//! Las reglas reciben el almacén explícitamente; en producción es
//! `PgIntegrityStore` sobre la transacción abierta por el controlador, de
//! modo que el chequeo, la desvinculación y el borrado se confirman o se
//! revierten juntos.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::orden_trabajo::{EstadoOrden, OrdenTrabajo};
use crate::utils::errors::{AppError, AppResult};

/// Entidad padre de órdenes de trabajo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entidad {
    Cliente(Uuid),
    Vehiculo(Uuid),
    Empleado(Uuid),
    Servicio(Uuid),
}

/// Cómo se elimina cada entidad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteMode {
    /// Se borra la fila
    Hard,
    /// Se marca `status = false`
    Soft,
}

impl Entidad {
    pub fn id(&self) -> Uuid {
        match *self {
            Entidad::Cliente(id)
            | Entidad::Vehiculo(id)
            | Entidad::Empleado(id)
            | Entidad::Servicio(id) => id,
        }
    }

    pub fn nombre(&self) -> &'static str {
        match self {
            Entidad::Cliente(_) => "cliente",
            Entidad::Vehiculo(_) => "vehículo",
            Entidad::Empleado(_) => "empleado",
            Entidad::Servicio(_) => "servicio",
        }
    }

    /// Columna de `orden_trabajos` que referencia a la entidad
    pub fn columna_orden(&self) -> &'static str {
        match self {
            Entidad::Cliente(_) => "cliente_id",
            Entidad::Vehiculo(_) => "vehiculo_id",
            Entidad::Empleado(_) => "empleado_id",
            Entidad::Servicio(_) => "servicio_id",
        }
    }

    /// Tabla de la entidad
    pub fn tabla(&self) -> &'static str {
        match self {
            Entidad::Cliente(_) => "clientes",
            Entidad::Vehiculo(_) => "vehiculos",
            Entidad::Empleado(_) => "empleados",
            Entidad::Servicio(_) => "servicios",
        }
    }

    /// Clientes se borran; vehículos, empleados y servicios se desactivan
    pub fn delete_mode(&self) -> DeleteMode {
        match self {
            Entidad::Cliente(_) => DeleteMode::Hard,
            Entidad::Vehiculo(_) | Entidad::Empleado(_) | Entidad::Servicio(_) => DeleteMode::Soft,
        }
    }
}

/// Resultado del chequeo previo a una eliminación
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteCheck {
    pub allowed: bool,
    pub reason: Option<String>,
    pub active_orders: i64,
}

impl DeleteCheck {
    fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
            active_orders: 0,
        }
    }

    fn blocked(reason: String, active_orders: i64) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
            active_orders,
        }
    }

    /// Convierte un bloqueo en `AppError::BusinessRule`
    pub fn into_result(self) -> AppResult<()> {
        if self.allowed {
            Ok(())
        } else {
            Err(AppError::BusinessRule(
                self.reason
                    .unwrap_or_else(|| "La eliminación no está permitida".to_string()),
            ))
        }
    }
}

/// Filas desvinculadas al eliminar un cliente
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UnlinkSummary {
    pub vehiculos: u64,
    pub ordenes: u64,
}

/// Resultado de una eliminación permitida
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub mode: DeleteMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlinked: Option<UnlinkSummary>,
}

/// Almacén sobre el que operan las reglas. Todas las operaciones están
/// acotadas al taller del almacén.
#[async_trait]
pub trait IntegrityStore: Send {
    /// Órdenes en `pending` o `in_progress` que referencian a la entidad
    async fn count_active_orders(&mut self, entidad: Entidad) -> AppResult<i64>;

    /// `cliente_id = NULL` en los vehículos del cliente y en sus órdenes
    /// `completed` / `cancelled`
    async fn unlink_cliente(&mut self, cliente_id: Uuid) -> AppResult<UnlinkSummary>;

    /// Elimina la entidad según `mode`; `false` si no existía
    async fn remove(&mut self, entidad: Entidad, mode: DeleteMode) -> AppResult<bool>;
}

/// Chequea si la entidad puede eliminarse
pub async fn can_delete<S>(store: &mut S, entidad: Entidad) -> AppResult<DeleteCheck>
where
    S: IntegrityStore + ?Sized,
{
    let active_orders = store.count_active_orders(entidad).await?;
    if active_orders == 0 {
        return Ok(DeleteCheck::allowed());
    }

    let reason = format!(
        "No se puede eliminar el {} porque tiene {} orden(es) de trabajo pendiente(s) o en progreso",
        entidad.nombre(),
        active_orders
    );
    Ok(DeleteCheck::blocked(reason, active_orders))
}

/// Desvincula vehículos y órdenes cerradas de un cliente
pub async fn unlink_dependents<S>(store: &mut S, cliente_id: Uuid) -> AppResult<UnlinkSummary>
where
    S: IntegrityStore + ?Sized,
{
    let summary = store.unlink_cliente(cliente_id).await?;
    info!(
        %cliente_id,
        vehiculos = summary.vehiculos,
        ordenes = summary.ordenes,
        "🔗 dependientes desvinculados del cliente"
    );
    Ok(summary)
}

/// Chequea, desvincula (clientes) y elimina la entidad.
///
/// Si el chequeo bloquea no se modifica ninguna fila.
#[tracing::instrument(skip(store))]
pub async fn delete_entity<S>(store: &mut S, entidad: Entidad) -> AppResult<DeleteOutcome>
where
    S: IntegrityStore + ?Sized,
{
    let check = can_delete(store, entidad).await?;
    if !check.allowed {
        warn!(active_orders = check.active_orders, "🚫 eliminación bloqueada");
        check.into_result()?;
    }

    let unlinked = match entidad {
        Entidad::Cliente(id) => Some(unlink_dependents(store, id).await?),
        _ => None,
    };

    let mode = entidad.delete_mode();
    if !store.remove(entidad, mode).await? {
        return Err(AppError::NotFound(format!(
            "{} con id '{}' no encontrado",
            entidad.nombre(),
            entidad.id()
        )));
    }

    info!(?mode, "🗑️ entidad eliminada");
    Ok(DeleteOutcome { mode, unlinked })
}

/// Una orden solo se elimina mientras está pendiente
pub fn check_orden_deletable(orden: &OrdenTrabajo) -> DeleteCheck {
    if orden.status == EstadoOrden::Pending {
        DeleteCheck::allowed()
    } else {
        DeleteCheck::blocked(
            format!(
                "Solo se pueden eliminar órdenes pendientes; la orden está en estado '{}'",
                orden.status.as_str()
            ),
            0,
        )
    }
}

/// El dueño de un vehículo no cambia mientras tenga órdenes activas: esas
/// órdenes quedarían a nombre de un cliente que ya no es el dueño.
pub fn check_vehiculo_owner_change(
    actual: Option<Uuid>,
    nuevo: Option<Uuid>,
    active_orders: i64,
) -> DeleteCheck {
    if actual == nuevo || active_orders == 0 {
        return DeleteCheck::allowed();
    }

    DeleteCheck::blocked(
        format!(
            "No se puede cambiar el dueño del vehículo porque tiene {} orden(es) de trabajo pendiente(s) o en progreso",
            active_orders
        ),
        active_orders,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    #[derive(Debug, Clone)]
    struct OrdenMem {
        cliente_id: Option<Uuid>,
        vehiculo_id: Uuid,
        empleado_id: Uuid,
        servicio_id: Uuid,
        status: EstadoOrden,
    }

    /// Almacén en memoria: clientes con borrado físico, el resto con `status`
    #[derive(Default)]
    struct MemoryStore {
        clientes: Vec<Uuid>,
        activos: HashMap<Uuid, bool>,
        vehiculo_owner: HashMap<Uuid, Option<Uuid>>,
        ordenes: Vec<OrdenMem>,
    }

    impl MemoryStore {
        fn referencia(orden: &OrdenMem, entidad: Entidad) -> bool {
            match entidad {
                Entidad::Cliente(id) => orden.cliente_id == Some(id),
                Entidad::Vehiculo(id) => orden.vehiculo_id == id,
                Entidad::Empleado(id) => orden.empleado_id == id,
                Entidad::Servicio(id) => orden.servicio_id == id,
            }
        }
    }

    #[async_trait]
    impl IntegrityStore for MemoryStore {
        async fn count_active_orders(&mut self, entidad: Entidad) -> AppResult<i64> {
            Ok(self
                .ordenes
                .iter()
                .filter(|o| Self::referencia(o, entidad) && o.status.is_active())
                .count() as i64)
        }

        async fn unlink_cliente(&mut self, cliente_id: Uuid) -> AppResult<UnlinkSummary> {
            let mut summary = UnlinkSummary::default();
            for owner in self.vehiculo_owner.values_mut() {
                if *owner == Some(cliente_id) {
                    *owner = None;
                    summary.vehiculos += 1;
                }
            }
            for orden in self.ordenes.iter_mut() {
                if orden.cliente_id == Some(cliente_id) && orden.status.is_terminal() {
                    orden.cliente_id = None;
                    summary.ordenes += 1;
                }
            }
            Ok(summary)
        }

        async fn remove(&mut self, entidad: Entidad, mode: DeleteMode) -> AppResult<bool> {
            let id = entidad.id();
            match mode {
                DeleteMode::Hard => {
                    let before = self.clientes.len();
                    self.clientes.retain(|c| *c != id);
                    Ok(before != self.clientes.len())
                }
                DeleteMode::Soft => match self.activos.get_mut(&id) {
                    Some(status) => {
                        *status = false;
                        Ok(true)
                    }
                    None => Ok(false),
                },
            }
        }
    }

    struct Escenario {
        store: MemoryStore,
        cliente: Uuid,
        vehiculo: Uuid,
        empleado: Uuid,
        servicio: Uuid,
    }

    fn escenario() -> Escenario {
        let cliente = Uuid::new_v4();
        let vehiculo = Uuid::new_v4();
        let empleado = Uuid::new_v4();
        let servicio = Uuid::new_v4();

        let mut store = MemoryStore::default();
        store.clientes.push(cliente);
        store.activos.insert(vehiculo, true);
        store.activos.insert(empleado, true);
        store.activos.insert(servicio, true);
        store.vehiculo_owner.insert(vehiculo, Some(cliente));

        Escenario {
            store,
            cliente,
            vehiculo,
            empleado,
            servicio,
        }
    }

    impl Escenario {
        fn con_orden(mut self, status: EstadoOrden) -> Self {
            self.store.ordenes.push(OrdenMem {
                cliente_id: Some(self.cliente),
                vehiculo_id: self.vehiculo,
                empleado_id: self.empleado,
                servicio_id: self.servicio,
                status,
            });
            self
        }

        fn entidades(&self) -> [Entidad; 4] {
            [
                Entidad::Cliente(self.cliente),
                Entidad::Vehiculo(self.vehiculo),
                Entidad::Empleado(self.empleado),
                Entidad::Servicio(self.servicio),
            ]
        }
    }

    #[tokio::test]
    async fn test_active_orders_block_every_parent() {
        for status in [EstadoOrden::Pending, EstadoOrden::InProgress] {
            for i in 0..4 {
                let mut e = escenario().con_orden(status);
                let entidad = e.entidades()[i];

                let check = can_delete(&mut e.store, entidad).await.unwrap();
                assert!(!check.allowed);
                assert_eq!(check.active_orders, 1);
                assert!(check.reason.unwrap().contains(entidad.nombre()));

                let err = delete_entity(&mut e.store, entidad).await.unwrap_err();
                assert!(matches!(err, AppError::BusinessRule(_)));

                // nada se modificó
                assert!(e.store.clientes.contains(&e.cliente));
                assert!(e.store.activos.values().all(|activo| *activo));
                assert_eq!(e.store.vehiculo_owner[&e.vehiculo], Some(e.cliente));
                assert_eq!(e.store.ordenes[0].cliente_id, Some(e.cliente));
            }
        }
    }

    #[tokio::test]
    async fn test_cliente_delete_unlinks_history() {
        let mut e = escenario()
            .con_orden(EstadoOrden::Completed)
            .con_orden(EstadoOrden::Cancelled);

        let outcome = delete_entity(&mut e.store, Entidad::Cliente(e.cliente))
            .await
            .unwrap();

        assert_eq!(outcome.mode, DeleteMode::Hard);
        assert_eq!(
            outcome.unlinked,
            Some(UnlinkSummary {
                vehiculos: 1,
                ordenes: 2
            })
        );
        assert!(!e.store.clientes.contains(&e.cliente));
        assert_eq!(e.store.vehiculo_owner[&e.vehiculo], None);
        assert!(e.store.ordenes.iter().all(|o| o.cliente_id.is_none()));
    }

    #[tokio::test]
    async fn test_cliente_without_orders_can_be_deleted() {
        let mut e = escenario();
        let outcome = delete_entity(&mut e.store, Entidad::Cliente(e.cliente))
            .await
            .unwrap();
        assert_eq!(outcome.unlinked.unwrap().vehiculos, 1);
        assert!(e.store.clientes.is_empty());
    }

    #[tokio::test]
    async fn test_soft_delete_for_vehiculo_empleado_servicio() {
        let mut e = escenario().con_orden(EstadoOrden::Completed);
        for entidad in [
            Entidad::Vehiculo(e.vehiculo),
            Entidad::Empleado(e.empleado),
            Entidad::Servicio(e.servicio),
        ] {
            let outcome = delete_entity(&mut e.store, entidad).await.unwrap();
            assert_eq!(outcome.mode, DeleteMode::Soft);
            assert!(outcome.unlinked.is_none());
            assert_eq!(e.store.activos[&entidad.id()], false);
        }
        // la orden cerrada conserva sus referencias
        assert_eq!(e.store.ordenes[0].cliente_id, Some(e.cliente));
        assert!(e.store.clientes.contains(&e.cliente));
    }

    #[tokio::test]
    async fn test_missing_entity_is_not_found() {
        let mut e = escenario();
        let err = delete_entity(&mut e.store, Entidad::Empleado(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_other_clientes_are_untouched() {
        let mut e = escenario().con_orden(EstadoOrden::Completed);
        let otro = Uuid::new_v4();
        let otro_vehiculo = Uuid::new_v4();
        e.store.clientes.push(otro);
        e.store.vehiculo_owner.insert(otro_vehiculo, Some(otro));

        delete_entity(&mut e.store, Entidad::Cliente(e.cliente))
            .await
            .unwrap();

        assert!(e.store.clientes.contains(&otro));
        assert_eq!(e.store.vehiculo_owner[&otro_vehiculo], Some(otro));
    }

    fn orden(status: EstadoOrden) -> OrdenTrabajo {
        let now = Utc::now();
        OrdenTrabajo {
            id: Uuid::new_v4(),
            taller_id: Uuid::new_v4(),
            cliente_id: None,
            vehiculo_id: Uuid::new_v4(),
            empleado_id: Uuid::new_v4(),
            servicio_id: Uuid::new_v4(),
            description: "Alineación".to_string(),
            status,
            total_amount: Decimal::new(5000000, 2),
            start_date: None,
            end_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_owner_change_blocked_by_active_orders() {
        let actual = Some(Uuid::new_v4());
        let nuevo = Some(Uuid::new_v4());

        let check = check_vehiculo_owner_change(actual, nuevo, 2);
        assert!(!check.allowed);
        assert_eq!(check.active_orders, 2);
        assert!(matches!(check.into_result(), Err(AppError::BusinessRule(_))));

        assert!(check_vehiculo_owner_change(actual, nuevo, 0).allowed);
        assert!(check_vehiculo_owner_change(actual, actual, 2).allowed);
        assert!(!check_vehiculo_owner_change(None, nuevo, 1).allowed);
    }

    #[test]
    fn test_only_pending_orders_can_be_deleted() {
        assert!(check_orden_deletable(&orden(EstadoOrden::Pending)).allowed);
        for status in [
            EstadoOrden::InProgress,
            EstadoOrden::Completed,
            EstadoOrden::Cancelled,
        ] {
            let check = check_orden_deletable(&orden(status));
            assert!(!check.allowed);
            assert!(matches!(check.into_result(), Err(AppError::BusinessRule(_))));
        }
    }
}
