//! Modelos de reportes y dashboard
//!
//! Resultados de agregaciones de solo lectura sobre `orden_trabajos`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::orden_trabajo::EstadoOrden;

/// Rango de fechas de un reporte (sobre `created_at`, ambos inclusive)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ReporteFilters {
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
}

/// Conteo de órdenes por estado
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ConteoEstado {
    pub status: EstadoOrden,
    pub total: i64,
}

/// Orden reciente con nombres resueltos para las tarjetas del dashboard
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrdenResumen {
    pub id: Uuid,
    pub cliente_name: Option<String>,
    pub license_plate: String,
    pub servicio_name: String,
    pub empleado_name: String,
    pub status: EstadoOrden,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Resumen para dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub taller_id: Uuid,
    pub generated_at: DateTime<Utc>,

    // Entidades activas
    pub clientes_activos: i64,
    pub vehiculos_activos: i64,
    pub empleados_activos: i64,
    pub servicios_activos: i64,

    // Órdenes
    pub ordenes_por_estado: Vec<ConteoEstado>,
    pub ordenes_activas: i64,

    // Ingresos de órdenes completadas
    pub ingresos_totales: Decimal,
    pub ingresos_mes: Decimal,

    pub ordenes_recientes: Vec<OrdenResumen>,
}

/// Ingresos agrupados por servicio
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IngresoPorServicio {
    pub servicio_id: Uuid,
    pub servicio_name: String,
    pub ordenes: i64,
    pub total: Decimal,
    pub promedio: Decimal,
}

/// Desempeño de cada empleado en el rango
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DesempenoEmpleado {
    pub empleado_id: Uuid,
    pub empleado_name: String,
    pub ordenes_asignadas: i64,
    pub ordenes_completadas: i64,
    pub total_facturado: Decimal,
}

/// Fila del reporte de órdenes (insumo de la exportación a PDF)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrdenReporte {
    pub id: Uuid,
    pub cliente_name: Option<String>,
    pub cliente_document: Option<String>,
    pub vehiculo: String,
    pub license_plate: String,
    pub empleado_name: String,
    pub servicio_name: String,
    pub description: String,
    pub status: EstadoOrden,
    pub total_amount: Decimal,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Reporte con totales
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reporte<T> {
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
    pub generated_at: DateTime<Utc>,
    pub filas: Vec<T>,
    pub total: Decimal,
}
