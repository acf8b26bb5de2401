//! Middleware de autenticación JWT
//!
//! Este módulo extrae el token Bearer, lo verifica e inyecta el usuario
//! autenticado (con su taller y rol) en las extensions de la request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    models::auth::Rol,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub taller_id: Uuid,
    pub rol: Rol,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.jwt)?;

    let authenticated_user = AuthenticatedUser {
        user_id: Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?,
        taller_id: Uuid::parse_str(&claims.taller_id)
            .map_err(|_| AppError::Unauthorized("ID de taller inválido".to_string()))?,
        rol: claims.rol,
    };

    tracing::debug!(
        user_id = %authenticated_user.user_id,
        taller_id = %authenticated_user.taller_id,
        rol = authenticated_user.rol.as_str(),
        "usuario autenticado"
    );

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}
