//! Delivery booking API handlers
//!
//! Sellers drop off sold items through these slots; completed deliveries
//! are what the buyer-side eligibility gate later reads.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{DELIVERIES, schedule};
use crate::scheduling;
use shared::models::{Booking, BookingCreate, BookingStatusUpdate, Role, ScheduleKind};
use shared::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub schedule_id: Option<i64>,
}

/// GET /api/deliveries - admin: bookings for one of their schedules;
/// seller: their own bookings
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    match user.role {
        Role::Admin => {
            let schedule_id = query
                .schedule_id
                .ok_or_else(|| AppError::validation("schedule_id query parameter is required"))?;
            let sched = schedule::find_by_id(&state.pool, schedule_id)
                .await?
                .ok_or_else(|| AppError::schedule_not_found(schedule_id))?;
            if sched.admin_id != user.id {
                return Err(AppError::forbidden("Schedule belongs to another admin"));
            }
            let bookings = DELIVERIES
                .find_by_schedule(&state.pool, schedule_id)
                .await?;
            Ok(Json(bookings))
        }
        Role::Seller => {
            let bookings = DELIVERIES
                .find_by_participant(&state.pool, &user.id)
                .await?;
            Ok(Json(bookings))
        }
        Role::Buyer => Err(AppError::forbidden("Buyers have no delivery bookings")),
    }
}

/// POST /api/deliveries - book a delivery slot (seller)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<Booking>> {
    let booking =
        scheduling::create_booking(&state.pool, &user, ScheduleKind::Delivery, &payload).await?;
    Ok(Json(booking))
}

/// PUT /api/deliveries/:id/status - set booking status (admin)
pub async fn set_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<BookingStatusUpdate>,
) -> AppResult<Json<Booking>> {
    let booking = scheduling::transition_booking_status(
        &state.pool,
        &user,
        ScheduleKind::Delivery,
        id,
        &payload,
    )
    .await?;
    Ok(Json(booking))
}
