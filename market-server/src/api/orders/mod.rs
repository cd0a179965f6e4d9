//! Order API module
//!
//! Minimal order surface backing the scheduling flows.
//!
//! | Path | Method | Who |
//! |------|--------|-----|
//! | /api/orders | POST | buyer |
//! | /api/orders | GET | any (role-scoped) |
//! | /api/orders/{id} | GET | participant or assigned admin |
//! | /api/orders/{id}/assign | PUT | admin |

mod handler;

use axum::{Router, middleware, routing::get, routing::put};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let admin_routes = Router::new()
        .route("/api/orders/{id}/assign", put(handler::assign))
        .layer(middleware::from_fn(require_admin));

    let shared_routes = Router::new()
        .route("/api/orders", get(handler::list).post(handler::create))
        .route("/api/orders/{id}", get(handler::get_by_id));

    admin_routes.merge(shared_routes)
}
