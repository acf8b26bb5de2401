use serde::{Deserialize, Serialize};

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rol {
    Admin,
    Recepcionista,
    Mecanico,
}

impl Rol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Admin => "admin",
            Rol::Recepcionista => "recepcionista",
            Rol::Mecanico => "mecanico",
        }
    }
}

/// Permisos que cada operación exige
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permiso {
    VerClientes,
    GestionarClientes,
    VerVehiculos,
    GestionarVehiculos,
    VerEmpleados,
    GestionarEmpleados,
    VerServicios,
    GestionarServicios,
    VerOrdenes,
    GestionarOrdenes,
    CambiarEstadoOrden,
    VerDashboard,
    VerReportes,
}
