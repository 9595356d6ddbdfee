//! Bearer-token authentication extractor.

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use cartwheel_core::UserId;

use crate::error::AppError;
use crate::state::AppState;

/// Extractor for routes that require a logged-in user.
///
/// Rejects with 401 unless the request carries a valid `Authorization:
/// Bearer <token>` header.
#[derive(Debug, Clone, Copy)]
pub struct RequireAuth(pub UserId);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Access denied. No token provided.".to_owned()))?;

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                AppError::Unauthorized("Invalid token format. Use 'Bearer <token>'.".to_owned())
            })?;

        let user_id = state
            .tokens()
            .verify(token)
            .map_err(|err| AppError::Unauthorized(err.to_string()))?;

        Ok(Self(user_id))
    }
}
