//! Schedule Model (admin-published time slots)

use serde::{Deserialize, Serialize};

/// Slot kind — whether the admin is collecting from sellers (pickup by the
/// buyer side happens against `Pickup` schedules, seller drop-offs against
/// `Delivery` schedules)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    Pickup,
    Delivery,
}

impl ScheduleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Delivery => "delivery",
        }
    }
}

/// Schedule status — schedules are never deleted, only deactivated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Active,
    Inactive,
}

impl Default for ScheduleStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Schedule record - an admin-owned, capacity-bounded time slot
///
/// Occupancy is never stored on the schedule; it is always derived by
/// counting booking rows against `max_slots`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Schedule {
    pub id: i64,
    /// Owning admin (participant ID from the identity claim)
    pub admin_id: String,
    pub kind: ScheduleKind,
    /// Calendar day, "YYYY-MM-DD"
    pub date: String,
    /// Window start, "HH:MM"
    pub start_time: String,
    /// Window end, "HH:MM"
    pub end_time: String,
    /// Capacity, fixed at creation (>= 1)
    pub max_slots: i64,
    pub status: ScheduleStatus,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub updated_at: i64,
}

/// Create schedule payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleCreate {
    pub kind: ScheduleKind,
    /// Calendar day, "YYYY-MM-DD"
    pub date: String,
    /// Window start, "HH:MM"
    pub start_time: String,
    /// Window end, "HH:MM"
    pub end_time: String,
    pub max_slots: i64,
}

/// Set schedule status payload (capacity is immutable after creation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSetStatus {
    pub status: ScheduleStatus,
}

/// Filter for listing schedules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleFilter {
    pub admin_id: Option<String>,
    pub kind: Option<ScheduleKind>,
    pub status: Option<ScheduleStatus>,
    /// Inclusive lower bound, "YYYY-MM-DD"
    pub date_from: Option<String>,
    /// Inclusive upper bound, "YYYY-MM-DD"
    pub date_to: Option<String>,
}

/// Read-model entry produced by the availability projector: a schedule
/// annotated with derived occupancy and remaining capacity.
///
/// `available_slots` can be negative after a lost capacity race; consumers
/// must treat any non-positive value as "no availability".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotAvailability {
    #[serde(flatten)]
    pub schedule: Schedule,
    pub occupancy: i64,
    pub available_slots: i64,
    pub is_available: bool,
}
