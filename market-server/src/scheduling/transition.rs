//! Admin-side mutations: booking status updates and order assignment.
//!
//! Status updates validate vocabulary membership only. There is no
//! transition graph; a completed booking may go back to pending, which
//! frees nothing because occupancy counts rows, not statuses.

use crate::audit_log;
use crate::auth::CurrentUser;
use crate::db::repository::{Ledger, order};
use crate::utils::validation::{MAX_ID_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use shared::models::{Booking, BookingStatus, BookingStatusUpdate, Order, OrderAssign, ScheduleKind};
use shared::{AppError, AppResult, ErrorCode};

/// Set a booking's status in the ledger matching `kind`.
///
/// The status arrives as a raw string so unknown values are rejected
/// here with `InvalidBookingStatus` instead of failing deserialization.
pub async fn transition_booking_status(
    pool: &sqlx::SqlitePool,
    admin: &CurrentUser,
    kind: ScheduleKind,
    booking_id: i64,
    data: &BookingStatusUpdate,
) -> AppResult<Booking> {
    let status = BookingStatus::parse(&data.status)
        .filter(|s| s.is_allowed_for(kind))
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::InvalidBookingStatus,
                format!(
                    "Status '{}' is not valid for {} bookings",
                    data.status,
                    kind.as_str()
                ),
            )
        })?;

    validate_optional_text(&data.admin_notes, "admin_notes", MAX_NOTE_LEN)?;

    let ledger = Ledger::for_kind(kind);
    let booking = ledger
        .update_status(pool, booking_id, status, data.admin_notes.as_deref())
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::BookingNotFound,
                format!("Booking {booking_id} not found"),
            )
        })?;

    audit_log!(
        &admin.id,
        "booking_status",
        &format!("{}:{}", kind.as_str(), booking_id),
        status.as_str()
    );
    Ok(booking)
}

/// Assign (or reassign) an admin to an order. Overwrites any previous
/// assignment; existing bookings made under the old admin are untouched.
pub async fn assign_admin_to_order(
    pool: &sqlx::SqlitePool,
    actor: &CurrentUser,
    order_id: i64,
    data: &OrderAssign,
) -> AppResult<Order> {
    validate_required_text(&data.assigned_admin_id, "assigned_admin_id", MAX_ID_LEN)?;

    let updated = order::assign_admin(pool, order_id, &data.assigned_admin_id, &actor.id)
        .await
        .map_err(|e| match e {
            crate::db::repository::RepoError::NotFound(_) => AppError::with_message(
                ErrorCode::OrderNotFound,
                format!("Order {order_id} not found"),
            ),
            other => other.into(),
        })?;

    audit_log!(
        &actor.id,
        "order_assign",
        &format!("order:{order_id}"),
        &data.assigned_admin_id
    );
    Ok(updated)
}
