//! Gating policy table
//!
//! Which (role, slot kind) pairs may query and book schedules, and whether
//! the completed-delivery gate applies. The buyer/seller asymmetry — buyers
//! are gated on an upstream completed delivery, sellers are not reciprocally
//! gated — is intentional and kept visible as policy data instead of being
//! buried in branching.

use shared::models::{Role, ScheduleKind};

/// Gate rules for one (role, kind) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatePolicy {
    /// Require a completed delivery booking under the candidate admin for a
    /// product the participant has ordered (cross-order proxy check)
    pub requires_completed_delivery: bool,
}

/// The full policy table. Pairs missing from this table cannot query or
/// book slots at all (admins manage schedules through the registry surface,
/// not the gate).
const POLICY_TABLE: &[(Role, ScheduleKind, GatePolicy)] = &[
    (
        Role::Buyer,
        ScheduleKind::Pickup,
        GatePolicy {
            requires_completed_delivery: true,
        },
    ),
    (
        Role::Seller,
        ScheduleKind::Delivery,
        GatePolicy {
            requires_completed_delivery: false,
        },
    ),
];

/// Look up the gate policy for a (role, kind) pair
pub fn gate_policy(role: Role, kind: ScheduleKind) -> Option<GatePolicy> {
    POLICY_TABLE
        .iter()
        .find(|(r, k, _)| *r == role && *k == kind)
        .map(|(_, _, policy)| *policy)
}
