//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema
//! PostgreSQL del taller y los requests validados de cada entidad.

pub mod auth;
pub mod cliente;
pub mod empleado;
pub mod orden_trabajo;
pub mod reporte;
pub mod servicio;
pub mod vehiculo;
