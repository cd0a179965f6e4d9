//! Utility module
//!
//! - [`AppError`] / [`ApiResponse`] (from `shared::error`)
//! - logging setup
//! - date/time and text validation helpers

pub mod logger;
pub mod time;
pub mod validation;

pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
