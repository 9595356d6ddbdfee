//! Account registration, login, and profile.

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use cartwheel_core::UserId;

use crate::error::{AppError, Result};
use crate::extract::Json;
use crate::middleware::RequireAuth;
use crate::models::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    /// Display name; accounts work fine without one.
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// Flat account-plus-token payload returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub id: UserId,
    pub name: Option<String>,
    pub email: String,
    pub token: String,
}

impl AuthResponse {
    fn new(user: User, token: String) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email.into_inner(),
            token,
        }
    }
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let user = state
        .auth()
        .register(body.name, &body.email, &body.password)
        .await?;
    let token = state
        .tokens()
        .issue(user.id)
        .map_err(|err| AppError::Internal(err.to_string()))?;

    tracing::info!(user_id = %user.id, "account registered");
    Ok((StatusCode::CREATED, Json(AuthResponse::new(user, token))))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<AuthResponse>> {
    let user = state.auth().login(&body.email, &body.password).await?;
    let token = state
        .tokens()
        .issue(user.id)
        .map_err(|err| AppError::Internal(err.to_string()))?;

    Ok(Json(AuthResponse::new(user, token)))
}

/// `GET /api/auth/profile`
pub async fn profile(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
) -> Result<Json<User>> {
    let user = state.auth().profile(user_id).await?;
    Ok(Json(user))
}
