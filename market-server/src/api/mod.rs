//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check (public)
//! - [`schedules`] - schedule registry and the eligible-slots listing
//! - [`pickups`] - pickup booking ledger
//! - [`deliveries`] - delivery booking ledger
//! - [`orders`] - minimal order surface (create, list, assign)

pub mod deliveries;
pub mod health;
pub mod orders;
pub mod pickups;
pub mod schedules;
