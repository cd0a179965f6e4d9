//! Unified error codes for the campus marketplace services
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Schedule errors
//! - 4xxx: Booking errors
//! - 5xxx: Order errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Schedule ====================
    /// Schedule not found
    ScheduleNotFound = 3001,
    /// Schedule has been deactivated
    ScheduleInactive = 3002,
    /// Schedule capacity exhausted (slot no longer available)
    CapacityExceeded = 3003,
    /// Capacity out of range (max_slots must be >= 1)
    InvalidCapacity = 3004,
    /// Malformed date or time window
    InvalidTimeWindow = 3005,

    // ==================== 4xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Status value not in the booking's vocabulary
    InvalidBookingStatus = 4002,

    // ==================== 5xxx: Order ====================
    /// Order not found
    OrderNotFound = 5001,
    /// Order has no assigned admin yet
    OrderNotAssigned = 5002,
    /// Requester is not a participant of the order
    NotOrderParticipant = 5003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric value of this error code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            Self::NotAuthenticated => "Please login first",
            Self::InvalidCredentials => "Invalid credentials",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",

            Self::PermissionDenied => "Permission denied",
            Self::RoleRequired => "Role required",
            Self::AdminRequired => "Admin role required",

            Self::ScheduleNotFound => "Schedule not found",
            Self::ScheduleInactive => "Schedule is inactive",
            Self::CapacityExceeded => "Slot no longer available",
            Self::InvalidCapacity => "Capacity must be at least 1",
            Self::InvalidTimeWindow => "Invalid date or time window",

            Self::BookingNotFound => "Booking not found",
            Self::InvalidBookingStatus => "Invalid booking status",

            Self::OrderNotFound => "Order not found",
            Self::OrderNotAssigned => "Order has no assigned admin",
            Self::NotOrderParticipant => "Not a participant of this order",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unrecognized u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,

            2001 => Self::PermissionDenied,
            2002 => Self::RoleRequired,
            2003 => Self::AdminRequired,

            3001 => Self::ScheduleNotFound,
            3002 => Self::ScheduleInactive,
            3003 => Self::CapacityExceeded,
            3004 => Self::InvalidCapacity,
            3005 => Self::InvalidTimeWindow,

            4001 => Self::BookingNotFound,
            4002 => Self::InvalidBookingStatus,

            5001 => Self::OrderNotFound,
            5002 => Self::OrderNotAssigned,
            5003 => Self::NotOrderParticipant,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
