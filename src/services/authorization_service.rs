use crate::middleware::auth::AuthenticatedUser;
use crate::models::auth::{Permiso, Rol};
use crate::utils::errors::AppError;

/// Servicio de autorización para verificar permisos por rol
pub struct AuthorizationService;

impl AuthorizationService {
    /// Verifica si un rol tiene un permiso específico
    pub fn has_permission(rol: Rol, permiso: Permiso) -> bool {
        use Permiso::*;

        match rol {
            Rol::Admin => true,
            Rol::Recepcionista => matches!(
                permiso,
                VerClientes
                    | GestionarClientes
                    | VerVehiculos
                    | GestionarVehiculos
                    | VerEmpleados
                    | VerServicios
                    | VerOrdenes
                    | GestionarOrdenes
                    | CambiarEstadoOrden
                    | VerDashboard
            ),
            Rol::Mecanico => matches!(
                permiso,
                VerClientes | VerVehiculos | VerServicios | VerOrdenes | CambiarEstadoOrden
            ),
        }
    }

    /// Exige un permiso, devolviendo `Forbidden` si el usuario no lo tiene
    pub fn require(user: &AuthenticatedUser, permiso: Permiso) -> Result<(), AppError> {
        if Self::has_permission(user.rol, permiso) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "El rol '{}' no tiene el permiso {:?}",
                user.rol.as_str(),
                permiso
            )))
        }
    }
}
