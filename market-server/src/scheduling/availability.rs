//! Slot Availability Projector
//!
//! Combines the schedule registry, the booking ledgers, and the eligibility
//! gate into the read model served to participants. Occupancy is recomputed
//! from the ledger on every call — there is no cached counter to drift.
//!
//! Filter, don't flag: schedules that are full or ineligible are dropped
//! from the result entirely, so the response shape cannot distinguish
//! "full" from "not eligible".

use crate::auth::CurrentUser;
use crate::db::repository::{Ledger, schedule};
use crate::scheduling::{eligibility, policy};
use crate::utils::time;
use shared::models::{ScheduleFilter, ScheduleKind, ScheduleStatus, SlotAvailability};
use shared::{AppError, AppResult};
use sqlx::SqlitePool;

/// Project the eligible, bookable slots for one participant.
///
/// `date`, when present, restricts the listing to a single calendar day
/// (inclusive bounds on the schedule's `date` column).
pub async fn list_eligible(
    pool: &SqlitePool,
    user: &CurrentUser,
    kind: ScheduleKind,
    status: Option<ScheduleStatus>,
    date: Option<&str>,
) -> AppResult<Vec<SlotAvailability>> {
    // reject malformed filters up front instead of matching nothing
    if let Some(d) = date {
        time::parse_date(d)?;
    }

    let gate = policy::gate_policy(user.role, kind).ok_or_else(|| {
        AppError::forbidden(format!(
            "Role {} cannot request {} slots",
            user.role,
            kind.as_str()
        ))
    })?;

    // Step 1-2: admins assigned to this participant's orders. No
    // assignment, no schedules.
    let mut admin_ids = eligibility::eligible_admin_ids(pool, &user.id, user.role).await?;
    if admin_ids.is_empty() {
        return Ok(Vec::new());
    }

    // Step 4 (buyer pickups only): completion gate per candidate admin
    if gate.requires_completed_delivery {
        let mut passed = Vec::with_capacity(admin_ids.len());
        for admin_id in admin_ids {
            if eligibility::passes_completion_gate(pool, &user.id, &admin_id).await? {
                passed.push(admin_id);
            }
        }
        admin_ids = passed;
        if admin_ids.is_empty() {
            return Ok(Vec::new());
        }
    }

    // Step 3: candidate schedules per eligible admin, then annotate with
    // derived occupancy and keep only bookable entries
    let ledger = Ledger::for_kind(kind);
    let status = status.unwrap_or(ScheduleStatus::Active);
    let mut slots = Vec::new();

    for admin_id in &admin_ids {
        let filter = ScheduleFilter {
            admin_id: Some(admin_id.clone()),
            kind: Some(kind),
            status: Some(status),
            date_from: date.map(str::to_string),
            date_to: date.map(str::to_string),
        };
        for sched in schedule::find_filtered(pool, &filter).await? {
            let occupancy = ledger.count_for_schedule(pool, sched.id).await?;
            // Can go negative after a lost capacity race; never clamp at
            // write time, treat <= 0 as unavailable here
            let available_slots = sched.max_slots - occupancy;
            let is_available = available_slots > 0;
            if !is_available {
                continue;
            }
            slots.push(SlotAvailability {
                schedule: sched,
                occupancy,
                available_slots,
                is_available,
            });
        }
    }

    Ok(slots)
}
