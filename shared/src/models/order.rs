//! Order Model

use serde::{Deserialize, Serialize};

/// Order record - a buyer's purchase of one product from one seller
///
/// At most one admin is responsible for an order's logistics at a time;
/// reassignment overwrites the previous assignment and keeps no history.
/// The order's own `status` field is informational only — the eligibility
/// gate reads booking statuses directly, never this field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub buyer_id: String,
    pub seller_id: String,
    pub product_id: i64,
    pub status: String,
    /// Admin currently responsible for logistics, if any
    pub assigned_admin_id: Option<String>,
    /// When the current assignment was made (Unix millis)
    pub assigned_at: Option<i64>,
    /// Admin who made the current assignment
    pub assigned_by: Option<String>,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub updated_at: i64,
}

/// Create order payload (buyer request)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub seller_id: String,
    pub product_id: i64,
}

/// Assign admin payload (admin request, idempotent overwrite)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAssign {
    pub assigned_admin_id: String,
}
