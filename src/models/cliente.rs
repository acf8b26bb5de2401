//! Modelo de Cliente
//!
//! Mapea la tabla `clientes`. Los clientes se eliminan físicamente; sus
//! vehículos y órdenes cerradas quedan desvinculados (ver `services::integridad`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_document_number, validate_not_empty, validate_phone};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cliente {
    pub id: Uuid,
    pub taller_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub document_number: String,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear o actualizar (registro completo) un cliente
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClienteRequest {
    #[validate(length(min = 2, max = 255), custom = "validate_not_empty")]
    pub name: String,

    #[validate(email, length(max = 255))]
    pub email: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[validate(length(min = 5, max = 500))]
    pub address: String,

    #[validate(custom = "validate_document_number")]
    pub document_number: String,

    #[serde(default = "default_status")]
    pub status: bool,
}

pub(crate) fn default_status() -> bool {
    true
}

/// Constraints únicas de `clientes` y el campo que protegen
pub const CLIENTE_UNIQUE_FIELDS: &[(&str, &str)] = &[
    ("clientes_email_unique", "email"),
    ("clientes_document_number_unique", "document_number"),
];
