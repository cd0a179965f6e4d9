//! Authentication module
//!
//! JWT authentication and role checks:
//! - [`JwtService`] - token service
//! - [`CurrentUser`] - verified identity context
//! - [`require_auth`] - authentication middleware
//! - [`require_admin`] - admin role middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
