//! Servicios de negocio
//!
//! Reglas de integridad, ciclo de vida de las órdenes y autorización.

pub mod authorization_service;
pub mod integridad;
pub mod orden_lifecycle;
