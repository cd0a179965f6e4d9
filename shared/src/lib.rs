//! Shared types for the campus marketplace services
//!
//! - [`error`] - unified error codes, `AppError`, and API response shapes
//! - [`models`] - domain entities and request payloads
//! - [`util`] - small helpers (timestamps)

pub mod error;
pub mod models;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
