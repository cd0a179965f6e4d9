//! Scheduling domain services.
//!
//! The layering runs policy -> eligibility -> availability -> booking:
//! the policy table says which role/kind pairs exist at all, eligibility
//! narrows schedules to the participant's assigned admins, availability
//! projects occupancy on top, and booking re-validates everything before
//! the conditional insert that enforces capacity.

pub mod availability;
pub mod booking;
pub mod eligibility;
pub mod policy;
pub mod transition;

pub use availability::list_eligible;
pub use booking::create_booking;
pub use policy::{GatePolicy, gate_policy};
pub use transition::{assign_admin_to_order, transition_booking_status};

#[cfg(test)]
mod tests;
