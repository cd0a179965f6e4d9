//! Pickup booking API module
//!
//! | Path | Method | Who |
//! |------|--------|-----|
//! | /api/pickups | GET | admin (by schedule) / buyer (own) |
//! | /api/pickups | POST | buyer |
//! | /api/pickups/{id}/status | PUT | admin |

mod handler;

use axum::{Router, middleware, routing::put};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let admin_routes = Router::new()
        .route("/api/pickups/{id}/status", put(handler::set_status))
        .layer(middleware::from_fn(require_admin));

    let shared_routes = Router::new().route(
        "/api/pickups",
        axum::routing::get(handler::list).post(handler::create),
    );

    admin_routes.merge(shared_routes)
}
