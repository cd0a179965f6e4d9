//! Booking creation service
//!
//! Participants book one unit of a schedule's capacity for one of their
//! orders. The projector-side checks (eligibility, advertised availability)
//! are advisory; everything that matters is re-validated here, and the
//! capacity check itself happens inside the conditional insert so the
//! read-then-write race cannot overbook.

use crate::auth::CurrentUser;
use crate::db::repository::{Ledger, order, schedule};
use crate::scheduling::policy;
use shared::models::{Booking, BookingCreate, ScheduleKind, ScheduleStatus};
use shared::{AppError, AppResult, ErrorCode};

/// Create a booking in the ledger matching `kind`.
///
/// Validation order: role/kind pairing, order existence and ownership,
/// admin assignment, schedule existence and linkage — then the atomic
/// conditional insert, which authoritatively re-checks active status and
/// remaining capacity at commit time.
pub async fn create_booking(
    pool: &sqlx::SqlitePool,
    user: &CurrentUser,
    kind: ScheduleKind,
    data: &BookingCreate,
) -> AppResult<Booking> {
    policy::gate_policy(user.role, kind).ok_or_else(|| {
        AppError::forbidden(format!(
            "Role {} cannot book {} slots",
            user.role,
            kind.as_str()
        ))
    })?;

    let order = order::find_by_id(pool, data.order_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::OrderNotFound,
                format!("Order {} not found", data.order_id),
            )
        })?;

    let participant_matches = match kind {
        ScheduleKind::Pickup => order.buyer_id == user.id,
        ScheduleKind::Delivery => order.seller_id == user.id,
    };
    if !participant_matches {
        return Err(AppError::with_message(
            ErrorCode::NotOrderParticipant,
            format!("Order {} does not belong to this participant", order.id),
        ));
    }

    let assigned_admin = order.assigned_admin_id.as_deref().ok_or_else(|| {
        AppError::with_message(
            ErrorCode::OrderNotAssigned,
            format!("Order {} has no assigned admin yet", order.id),
        )
    })?;

    let sched = schedule::find_by_id(pool, data.schedule_id)
        .await?
        .ok_or_else(|| AppError::schedule_not_found(data.schedule_id))?;

    if sched.admin_id != assigned_admin {
        return Err(AppError::forbidden(format!(
            "Schedule {} does not belong to the order's assigned admin",
            sched.id
        )));
    }
    if sched.kind != kind {
        return Err(AppError::validation(format!(
            "Schedule {} is not a {} slot",
            sched.id,
            kind.as_str()
        )));
    }

    let ledger = Ledger::for_kind(kind);
    match ledger
        .insert_if_capacity(pool, sched.id, order.id, &user.id)
        .await?
    {
        Some(booking) => Ok(booking),
        None => {
            // The conditional insert refused: the schedule was deactivated
            // or filled between our read and the commit. Re-read to tell
            // the two apart.
            let current = schedule::find_by_id(pool, sched.id)
                .await?
                .ok_or_else(|| AppError::schedule_not_found(sched.id))?;
            if current.status == ScheduleStatus::Inactive {
                Err(AppError::schedule_inactive(sched.id))
            } else {
                Err(AppError::capacity_exceeded(sched.id))
            }
        }
    }
}
