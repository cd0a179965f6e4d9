//! Booking Ledger Repository
//!
//! Pickups and deliveries live in separate tables with an identical shape;
//! [`Ledger`] is a handle over one of the two. Capacity is enforced by
//! [`Ledger::insert_if_capacity`]: a single conditional INSERT whose WHERE
//! clause recounts occupancy against `max_slots` inside the statement, so
//! concurrent writers serialize on the database write lock and at most
//! `max_slots` rows can ever land for one schedule.

use super::RepoResult;
use shared::models::{Booking, BookingStatus, ScheduleKind};
use sqlx::SqlitePool;

const SELECT_LIST: &str =
    "id, schedule_id, order_id, participant_id, status, admin_notes, created_at, updated_at";

/// Handle over one of the two booking tables
#[derive(Debug, Clone, Copy)]
pub struct Ledger {
    table: &'static str,
    kind: ScheduleKind,
}

/// The pickup ledger (buyer bookings against pickup schedules)
pub const PICKUPS: Ledger = Ledger {
    table: "pickup",
    kind: ScheduleKind::Pickup,
};

/// The delivery ledger (seller bookings against delivery schedules)
pub const DELIVERIES: Ledger = Ledger {
    table: "delivery",
    kind: ScheduleKind::Delivery,
};

impl Ledger {
    pub fn for_kind(kind: ScheduleKind) -> Ledger {
        match kind {
            ScheduleKind::Pickup => PICKUPS,
            ScheduleKind::Delivery => DELIVERIES,
        }
    }

    pub fn kind(&self) -> ScheduleKind {
        self.kind
    }

    pub async fn find_by_id(&self, pool: &SqlitePool, id: i64) -> RepoResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {SELECT_LIST} FROM {} WHERE id = ?",
            self.table
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(booking)
    }

    /// Derived occupancy for one schedule — always recomputed, never cached
    pub async fn count_for_schedule(&self, pool: &SqlitePool, schedule_id: i64) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE schedule_id = ?",
            self.table
        ))
        .bind(schedule_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Atomic conditional insert: the booking lands only if the schedule
    /// exists, matches this ledger's kind, is active, and still has capacity
    /// at the instant the statement executes. Returns `None` when any of
    /// those conditions failed; the caller re-reads the schedule to decide
    /// which error to surface.
    pub async fn insert_if_capacity(
        &self,
        pool: &SqlitePool,
        schedule_id: i64,
        order_id: i64,
        participant_id: &str,
    ) -> RepoResult<Option<Booking>> {
        let now = shared::util::now_millis();
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "INSERT INTO {t} (schedule_id, order_id, participant_id, status, created_at, updated_at) \
             SELECT s.id, ?2, ?3, 'pending', ?4, ?4 FROM schedule s \
             WHERE s.id = ?1 AND s.kind = ?5 AND s.status = 'active' \
               AND (SELECT COUNT(*) FROM {t} b WHERE b.schedule_id = s.id) < s.max_slots \
             RETURNING {SELECT_LIST}",
            t = self.table
        ))
        .bind(schedule_id)
        .bind(order_id)
        .bind(participant_id)
        .bind(now)
        .bind(self.kind)
        .fetch_optional(pool)
        .await?;
        Ok(booking)
    }

    /// Set a booking's status. Vocabulary membership is checked by the
    /// caller; no transition ordering exists (any status may follow any
    /// other). `admin_notes` is only overwritten when provided.
    pub async fn update_status(
        &self,
        pool: &SqlitePool,
        id: i64,
        status: BookingStatus,
        admin_notes: Option<&str>,
    ) -> RepoResult<Option<Booking>> {
        let now = shared::util::now_millis();
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "UPDATE {} SET status = ?1, admin_notes = COALESCE(?2, admin_notes), updated_at = ?3 \
             WHERE id = ?4 RETURNING {SELECT_LIST}",
            self.table
        ))
        .bind(status)
        .bind(admin_notes)
        .bind(now)
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(booking)
    }

    pub async fn find_by_schedule(&self, pool: &SqlitePool, schedule_id: i64) -> RepoResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {SELECT_LIST} FROM {} WHERE schedule_id = ? ORDER BY created_at, id",
            self.table
        ))
        .bind(schedule_id)
        .fetch_all(pool)
        .await?;
        Ok(bookings)
    }

    pub async fn find_by_participant(
        &self,
        pool: &SqlitePool,
        participant_id: &str,
    ) -> RepoResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {SELECT_LIST} FROM {} WHERE participant_id = ? ORDER BY created_at DESC, id DESC",
            self.table
        ))
        .bind(participant_id)
        .fetch_all(pool)
        .await?;
        Ok(bookings)
    }
}
