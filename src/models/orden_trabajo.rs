//! Modelo de OrdenTrabajo
//!
//! Mapea la tabla `orden_trabajos`. Los efectos de las transiciones de
//! estado y el monto por defecto viven en `services::orden_lifecycle`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_amount, validate_not_empty};

/// Estado de la orden - mapea al ENUM orden_estado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "orden_estado", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EstadoOrden {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl EstadoOrden {
    pub const ALL: [EstadoOrden; 4] = [
        EstadoOrden::Pending,
        EstadoOrden::InProgress,
        EstadoOrden::Completed,
        EstadoOrden::Cancelled,
    ];

    /// Una orden activa bloquea la eliminación de sus entidades relacionadas
    pub fn is_active(self) -> bool {
        matches!(self, EstadoOrden::Pending | EstadoOrden::InProgress)
    }

    /// Completada o cancelada: historial que se conserva
    pub fn is_terminal(self) -> bool {
        !self.is_active()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EstadoOrden::Pending => "pending",
            EstadoOrden::InProgress => "in_progress",
            EstadoOrden::Completed => "completed",
            EstadoOrden::Cancelled => "cancelled",
        }
    }
}

impl Default for EstadoOrden {
    fn default() -> Self {
        EstadoOrden::Pending
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrdenTrabajo {
    pub id: Uuid,
    pub taller_id: Uuid,
    pub cliente_id: Option<Uuid>,
    pub vehiculo_id: Uuid,
    pub empleado_id: Uuid,
    pub servicio_id: Uuid,
    pub description: String,
    pub status: EstadoOrden,
    pub total_amount: Decimal,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear o actualizar (registro completo) una orden.
///
/// `total_amount` ausente o `null` toma el precio del servicio.
/// `cliente_id` solo puede ir en `null` al actualizar una orden cerrada que
/// quedó desvinculada al eliminar su cliente.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrdenTrabajoRequest {
    #[serde(default)]
    pub cliente_id: Option<Uuid>,
    pub vehiculo_id: Uuid,
    pub empleado_id: Uuid,
    pub servicio_id: Uuid,

    #[validate(length(min = 3, max = 5000), custom = "validate_not_empty")]
    pub description: String,

    #[serde(default)]
    pub status: EstadoOrden,

    #[serde(default)]
    #[validate(custom = "validate_amount")]
    pub total_amount: Option<Decimal>,

    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// Request para cambiar solo el estado de una orden
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CambiarEstadoRequest {
    pub status: EstadoOrden,
}

/// Filtros para el listado de órdenes
#[derive(Debug, Default, Deserialize)]
pub struct OrdenFilters {
    pub status: Option<EstadoOrden>,
    pub cliente_id: Option<Uuid>,
    pub vehiculo_id: Option<Uuid>,
    pub empleado_id: Option<Uuid>,
    pub servicio_id: Option<Uuid>,
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_statuses() {
        assert!(EstadoOrden::Pending.is_active());
        assert!(EstadoOrden::InProgress.is_active());
        assert!(EstadoOrden::Completed.is_terminal());
        assert!(EstadoOrden::Cancelled.is_terminal());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(serde_json::to_value(EstadoOrden::InProgress).unwrap(), "in_progress");
        let estado: EstadoOrden = serde_json::from_value(serde_json::json!("cancelled")).unwrap();
        assert_eq!(estado, EstadoOrden::Cancelled);
        for estado in EstadoOrden::ALL {
            assert_eq!(serde_json::to_value(estado).unwrap(), estado.as_str());
        }
    }

    #[test]
    fn test_request_defaults() {
        let json = serde_json::json!({
            "cliente_id": Uuid::new_v4(),
            "vehiculo_id": Uuid::new_v4(),
            "empleado_id": Uuid::new_v4(),
            "servicio_id": Uuid::new_v4(),
            "description": "Cambio de pastillas de freno",
            "total_amount": null
        });
        let req: OrdenTrabajoRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.status, EstadoOrden::Pending);
        assert!(req.total_amount.is_none());
        assert!(req.start_date.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_request_accepts_null_cliente() {
        let json = serde_json::json!({
            "cliente_id": null,
            "vehiculo_id": Uuid::new_v4(),
            "empleado_id": Uuid::new_v4(),
            "servicio_id": Uuid::new_v4(),
            "description": "Revisión general",
            "status": "completed",
            "total_amount": "150000.00"
        });
        let req: OrdenTrabajoRequest = serde_json::from_value(json).unwrap();
        assert!(req.cliente_id.is_none());
        assert_eq!(req.total_amount, Some(Decimal::new(15000000, 2)));
    }
}
