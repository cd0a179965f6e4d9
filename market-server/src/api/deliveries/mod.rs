//! Delivery booking API module
//!
//! | Path | Method | Who |
//! |------|--------|-----|
//! | /api/deliveries | GET | admin (by schedule) / seller (own) |
//! | /api/deliveries | POST | seller |
//! | /api/deliveries/{id}/status | PUT | admin |

mod handler;

use axum::{Router, middleware, routing::put};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let admin_routes = Router::new()
        .route("/api/deliveries/{id}/status", put(handler::set_status))
        .layer(middleware::from_fn(require_admin));

    let shared_routes = Router::new().route(
        "/api/deliveries",
        axum::routing::get(handler::list).post(handler::create),
    );

    admin_routes.merge(shared_routes)
}
