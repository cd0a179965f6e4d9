//! Campus marketplace scheduling service
//!
//! Admins publish capacity-bounded pickup and delivery slots; buyers and
//! sellers book them for their orders. Availability is always derived by
//! counting booking rows, and buyer pickup access is gated on a completed
//! delivery under the same admin.
//!
//! # Module structure
//!
//! ```text
//! market-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT validation, middleware
//! ├── scheduling/    # policy, eligibility, availability, booking, transitions
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # pool, migrations, repositories
//! └── utils/         # logging, validation helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod scheduling;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use utils::logger::{init_logger, init_logger_with_file};

/// Audit log macro - best-effort side-write, never fails the operation
#[macro_export]
macro_rules! audit_log {
    ($user_id:expr, $action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            user_id = %$user_id,
            action = %$action,
            resource = %$resource,
            "AUDIT"
        );
    };
    ($user_id:expr, $action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            user_id = %$user_id,
            action = %$action,
            resource = %$resource,
            details = %$details,
            "AUDIT"
        );
    };
}

/// Security log macro - records auth failures and permission denials
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::warn!(
            target: "security",
            level = %$level,
            event = %$event,
            $($key = %$value),*
        );
    };
}

/// Load `.env` and initialize logging. Called once from `main`.
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}
