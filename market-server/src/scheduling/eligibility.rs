//! Eligibility Gate
//!
//! Decides which admins' schedules a participant may see at all. Two
//! ingredients:
//!
//! 1. the assignment relationship — only schedules owned by an admin that
//!    is currently assigned to one of the participant's orders are
//!    candidates;
//! 2. for buyer pickup requests, the completion gate — a completed
//!    delivery booking must exist under that admin for a product the buyer
//!    has ordered.
//!
//! The completion gate is a cross-order proxy: it does not tie the
//! completed delivery to the *same* order being picked up, only the same
//! admin and *a* product among the buyer's orders. This mirrors the
//! observed system and is flagged as a product-level approximation rather
//! than a deliberate business rule; do not tighten it to same-order without
//! a requirements decision.

use crate::db::repository::RepoResult;
use shared::models::Role;
use sqlx::SqlitePool;

/// Distinct admins assigned to any of the participant's orders.
/// An empty result means the participant sees no schedules whatsoever.
pub async fn eligible_admin_ids(
    pool: &SqlitePool,
    participant_id: &str,
    role: Role,
) -> RepoResult<Vec<String>> {
    let column = match role {
        Role::Buyer => "buyer_id",
        Role::Seller => "seller_id",
        // Admins are not gated participants; they never reach this path
        Role::Admin => return Ok(Vec::new()),
    };

    let admin_ids: Vec<String> = sqlx::query_scalar(&format!(
        "SELECT DISTINCT assigned_admin_id FROM orders \
         WHERE {column} = ? AND assigned_admin_id IS NOT NULL \
         ORDER BY assigned_admin_id"
    ))
    .bind(participant_id)
    .fetch_all(pool)
    .await?;
    Ok(admin_ids)
}

/// The buyer completion gate: does a completed delivery booking exist under
/// `admin_id` for a product among the buyer's own orders?
pub async fn passes_completion_gate(
    pool: &SqlitePool,
    buyer_id: &str,
    admin_id: &str,
) -> RepoResult<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS ( \
             SELECT 1 FROM delivery d \
             JOIN schedule ds ON ds.id = d.schedule_id \
             JOIN orders o ON o.id = d.order_id \
             WHERE d.status = 'completed' \
               AND ds.admin_id = ?1 \
               AND o.product_id IN (SELECT product_id FROM orders WHERE buyer_id = ?2) \
         )",
    )
    .bind(admin_id)
    .bind(buyer_id)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}
