//! Schedule API module
//!
//! | Path | Method | Who |
//! |------|--------|-----|
//! | /api/schedules | POST | admin |
//! | /api/schedules | GET | admin (own schedules) |
//! | /api/schedules/{id}/status | PUT | admin (owner) |
//! | /api/schedules/eligible | GET | buyer / seller |

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let admin_routes = Router::new()
        .route("/api/schedules", post(handler::create).get(handler::list_own))
        .route("/api/schedules/{id}/status", put(handler::set_status))
        .layer(middleware::from_fn(require_admin));

    let participant_routes =
        Router::new().route("/api/schedules/eligible", get(handler::list_eligible));

    admin_routes.merge(participant_routes)
}
