//! Modelo de Servicio (catálogo)
//!
//! Mapea la tabla `servicios`. El precio es el monto por defecto de las
//! órdenes que lo referencian. La eliminación es lógica (`status = false`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::cliente::default_status;
use crate::utils::validation::{validate_amount, validate_duration};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Servicio {
    pub id: Uuid,
    pub taller_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub duration_hours: Decimal,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear o actualizar (registro completo) un servicio
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServicioRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(custom = "validate_amount")]
    pub price: Decimal,

    #[validate(custom = "validate_duration")]
    pub duration_hours: Decimal,

    #[serde(default = "default_status")]
    pub status: bool,
}
