//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::ScheduleNotFound
            | Self::BookingNotFound
            | Self::OrderNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict (slot taken between read and write, duplicate resources)
            Self::AlreadyExists | Self::CapacityExceeded => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::RoleRequired
            | Self::AdminRequired
            | Self::NotOrderParticipant => StatusCode::FORBIDDEN,

            // 422 Unprocessable Entity (request is well-formed, state forbids it)
            Self::ScheduleInactive | Self::OrderNotAssigned => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_exceeded_is_conflict() {
        assert_eq!(
            ErrorCode::CapacityExceeded.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_validation_is_bad_request() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidBookingStatus.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidCapacity.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_family() {
        for code in [
            ErrorCode::NotFound,
            ErrorCode::ScheduleNotFound,
            ErrorCode::BookingNotFound,
            ErrorCode::OrderNotFound,
        ] {
            assert_eq!(code.http_status(), StatusCode::NOT_FOUND);
        }
    }
}
