//! Booking Model (pickup and delivery ledger entries)

use serde::{Deserialize, Serialize};

use super::schedule::ScheduleKind;

/// Booking status
///
/// The two ledgers share one vocabulary except that delivery bookings never
/// use `in_progress`. The per-kind validated sets live in
/// [`BookingStatus::allowed_for`]; nothing beyond vocabulary membership is
/// enforced — any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl Default for BookingStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Pickup booking status vocabulary
pub const PICKUP_STATUSES: &[BookingStatus] = &[
    BookingStatus::Pending,
    BookingStatus::Confirmed,
    BookingStatus::InProgress,
    BookingStatus::Completed,
    BookingStatus::Cancelled,
];

/// Delivery booking status vocabulary (no `in_progress`)
pub const DELIVERY_STATUSES: &[BookingStatus] = &[
    BookingStatus::Pending,
    BookingStatus::Confirmed,
    BookingStatus::Completed,
    BookingStatus::Cancelled,
];

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a raw status string; `None` for anything outside the vocabulary
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// The validated status set for a ledger kind
    pub fn allowed_for(kind: ScheduleKind) -> &'static [BookingStatus] {
        match kind {
            ScheduleKind::Pickup => PICKUP_STATUSES,
            ScheduleKind::Delivery => DELIVERY_STATUSES,
        }
    }

    /// Whether this status is in the vocabulary of the given ledger kind
    pub fn is_allowed_for(&self, kind: ScheduleKind) -> bool {
        Self::allowed_for(kind).contains(self)
    }
}

/// Booking record - a participant's claim on one unit of a schedule's
/// capacity, tied to exactly one order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    pub schedule_id: i64,
    pub order_id: i64,
    /// Buyer (pickups) or seller (deliveries) participant ID
    pub participant_id: String,
    pub status: BookingStatus,
    /// Free-form notes set by admins on status transitions
    pub admin_notes: Option<String>,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub updated_at: i64,
}

/// Create booking payload (participant request)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub schedule_id: i64,
    pub order_id: i64,
}

/// Status transition payload (admin only)
///
/// `status` stays a raw string here so unrecognized values surface as the
/// service's own validation error rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStatusUpdate {
    pub status: String,
    pub admin_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_asymmetry() {
        assert!(BookingStatus::InProgress.is_allowed_for(ScheduleKind::Pickup));
        assert!(!BookingStatus::InProgress.is_allowed_for(ScheduleKind::Delivery));
        assert_eq!(PICKUP_STATUSES.len(), 5);
        assert_eq!(DELIVERY_STATUSES.len(), 4);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(BookingStatus::parse("flying"), None);
        assert_eq!(BookingStatus::parse("CONFIRMED"), None);
        assert_eq!(
            BookingStatus::parse("in_progress"),
            Some(BookingStatus::InProgress)
        );
    }
}
