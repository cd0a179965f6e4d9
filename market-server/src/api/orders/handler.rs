//! Order API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order;
use crate::scheduling;
use crate::utils::validation::{MAX_ID_LEN, validate_required_text};
use shared::models::{Order, OrderAssign, OrderCreate, Role};
use shared::{AppError, AppResult, ErrorCode};

/// POST /api/orders - create an order (buyer)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    if user.role != Role::Buyer {
        return Err(AppError::with_message(
            ErrorCode::RoleRequired,
            "Only buyers can create orders",
        ));
    }
    validate_required_text(&payload.seller_id, "seller_id", MAX_ID_LEN)?;

    let o = order::create(&state.pool, &user.id, &payload).await?;
    Ok(Json(o))
}

/// GET /api/orders - role-scoped listing: buyers and sellers see their own
/// orders, admins see orders assigned to them
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let orders = match user.role {
        Role::Buyer => order::find_for_buyer(&state.pool, &user.id).await?,
        Role::Seller => order::find_for_seller(&state.pool, &user.id).await?,
        Role::Admin => order::find_assigned_to(&state.pool, &user.id).await?,
    };
    Ok(Json(orders))
}

/// GET /api/orders/:id - visible to the buyer, the seller, or the
/// currently assigned admin
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let o = order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
        })?;

    let visible = o.buyer_id == user.id
        || o.seller_id == user.id
        || o.assigned_admin_id.as_deref() == Some(user.id.as_str());
    if !visible {
        return Err(AppError::with_message(
            ErrorCode::NotOrderParticipant,
            format!("Order {id} does not involve this participant"),
        ));
    }
    Ok(Json(o))
}

/// PUT /api/orders/:id/assign - assign an admin (admin, idempotent overwrite)
pub async fn assign(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<OrderAssign>,
) -> AppResult<Json<Order>> {
    let o = scheduling::assign_admin_to_order(&state.pool, &user, id, &payload).await?;
    Ok(Json(o))
}
