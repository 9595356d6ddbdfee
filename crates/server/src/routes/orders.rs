//! Order placement and history, all owner-scoped.

use axum::{extract::State, http::StatusCode};

use cartwheel_core::{Order, OrderId, OrderRequest};

use crate::error::{AppError, Result};
use crate::extract::{Json, Path};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// `POST /api/orders`
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    Json(request): Json<OrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = state.orders().place_order(user_id, &request).await?;

    tracing::info!(order_id = %order.id, user_id = %user_id, total = %order.total, "order placed");
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders`
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let orders = state.orders().list_for_user(user_id).await?;
    Ok(Json(orders))
}

/// `GET /api/orders/{id}`
///
/// A missing order and an order owned by someone else get the same 404.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    state
        .orders()
        .find_for_user(id, user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Order not found or access denied".to_owned()))
}
