//! Acceso a datos
//!
//! Cada repositorio recibe la conexión explícitamente: una conexión del pool
//! para lecturas o la transacción abierta por el controlador para escrituras.
//! Todas las consultas están acotadas por `taller_id`.

pub mod cliente_repository;
pub mod empleado_repository;
pub mod integridad_repository;
pub mod orden_trabajo_repository;
pub mod reporte_repository;
pub mod servicio_repository;
pub mod vehiculo_repository;
