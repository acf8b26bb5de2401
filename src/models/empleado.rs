//! Modelo de Empleado
//!
//! Mapea la tabla `empleados`. La eliminación es lógica (`status = false`).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::cliente::default_status;
use crate::utils::validation::{validate_amount, validate_phone};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Empleado {
    pub id: Uuid,
    pub taller_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub salary: Decimal,
    pub hire_date: NaiveDate,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear o actualizar (registro completo) un empleado
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmpleadoRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: String,

    #[validate(email, length(max = 255))]
    pub email: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[validate(length(min = 2, max = 100))]
    pub position: String,

    #[validate(custom = "validate_amount")]
    pub salary: Decimal,

    pub hire_date: NaiveDate,

    #[serde(default = "default_status")]
    pub status: bool,
}

pub const EMPLEADO_UNIQUE_FIELDS: &[(&str, &str)] = &[("empleados_email_unique", "email")];
