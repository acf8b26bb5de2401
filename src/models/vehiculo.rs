//! Modelo de Vehiculo
//!
//! Mapea la tabla `vehiculos`. `cliente_id` queda en NULL cuando el dueño
//! se elimina; la eliminación del vehículo es lógica (`status = false`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::cliente::default_status;
use crate::utils::validation::{validate_license_plate, VIN_REGEX};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehiculo {
    pub id: Uuid,
    pub taller_id: Uuid,
    pub cliente_id: Option<Uuid>,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub vin: String,
    pub color: String,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear o actualizar (registro completo) un vehículo.
///
/// `cliente_id` es obligatorio al crear; en la actualización puede ir en
/// `null` solo si el vehículo ya quedó desvinculado de su cliente.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VehiculoRequest {
    #[serde(default)]
    pub cliente_id: Option<Uuid>,

    #[validate(length(min = 2, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(custom = "validate_license_plate")]
    pub license_plate: String,

    #[validate(regex = "VIN_REGEX")]
    pub vin: String,

    #[validate(length(min = 2, max = 50))]
    pub color: String,

    #[serde(default = "default_status")]
    pub status: bool,
}

impl VehiculoRequest {
    /// Matrícula en mayúsculas y sin espacios en los extremos, tal como se
    /// persiste y se compara en la constraint única
    pub fn normalized(mut self) -> Self {
        self.license_plate = self.license_plate.trim().to_uppercase();
        self
    }
}

pub const VEHICULO_UNIQUE_FIELDS: &[(&str, &str)] = &[
    ("vehiculos_license_plate_unique", "license_plate"),
    ("vehiculos_vin_unique", "vin"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> VehiculoRequest {
        VehiculoRequest {
            cliente_id: Some(Uuid::new_v4()),
            brand: "Renault".to_string(),
            model: "Logan".to_string(),
            year: 2019,
            license_plate: "ABC-123".to_string(),
            vin: "1HGCM82633A004352".to_string(),
            color: "Gris".to_string(),
            status: true,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_invalid_vin_and_year() {
        let mut req = request();
        req.vin = "CORTO".to_string();
        req.year = 1850;

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("vin"));
        assert!(fields.contains_key("year"));
    }

    #[test]
    fn test_license_plate_is_normalized() {
        let mut req = request();
        req.license_plate = " abc-123 ".to_string();

        let req = req.normalized();
        assert_eq!(req.license_plate, "ABC-123");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_unlinked_vehiculo_round_trips_null_cliente() {
        let mut json = serde_json::to_value(request()).unwrap();
        json["cliente_id"] = serde_json::Value::Null;

        let req: VehiculoRequest = serde_json::from_value(json).unwrap();
        assert!(req.cliente_id.is_none());
        assert!(req.validate().is_ok());
    }
}
