//! Capability gate de autenticación
//!
//! La emisión de credenciales vive fuera de este servicio; aquí el token
//! solo se consume como un check de sí/no. Token ausente o inválido es
//! 401; token válido sin rol de staff es 403.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig, STAFF_ROLE};

/// Extractor para endpoints privilegiados: exige un Bearer token válido
/// con rol de staff.
pub struct StaffUser {
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for StaffUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized("Falta el header Authorization".to_string())
            })?;

        let token = extract_token_from_header(auth_header)
            .map_err(|_| AppError::Unauthorized("Bearer token requerido".to_string()))?;

        let claims = verify_token(token, &JwtConfig::from(&state.config))
            .map_err(|_| AppError::Unauthorized("Token inválido o expirado".to_string()))?;

        if claims.role != STAFF_ROLE {
            return Err(AppError::Forbidden(
                "Se requiere rol de staff para esta operación".to_string(),
            ));
        }

        Ok(StaffUser {
            user_id: claims.sub,
        })
    }
}
