//! Order Repository
//!
//! Orders carry the assignment relationship that scopes which schedules a
//! participant can see. Assignment is an idempotent overwrite: re-assigning
//! replaces the previous admin and refreshes `assigned_at`, keeping no
//! history.

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderCreate};
use sqlx::SqlitePool;

const SELECT_LIST: &str = "id, buyer_id, seller_id, product_id, status, assigned_admin_id, \
                           assigned_at, assigned_by, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!("SELECT {SELECT_LIST} FROM orders WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

pub async fn create(pool: &SqlitePool, buyer_id: &str, data: &OrderCreate) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let order = sqlx::query_as::<_, Order>(&format!(
        "INSERT INTO orders (buyer_id, seller_id, product_id, status, created_at, updated_at) \
         VALUES (?1, ?2, ?3, 'pending', ?4, ?4) RETURNING {SELECT_LIST}"
    ))
    .bind(buyer_id)
    .bind(&data.seller_id)
    .bind(data.product_id)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(order)
}

pub async fn find_for_buyer(pool: &SqlitePool, buyer_id: &str) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {SELECT_LIST} FROM orders WHERE buyer_id = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(buyer_id)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn find_for_seller(pool: &SqlitePool, seller_id: &str) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {SELECT_LIST} FROM orders WHERE seller_id = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(seller_id)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn find_assigned_to(pool: &SqlitePool, admin_id: &str) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {SELECT_LIST} FROM orders WHERE assigned_admin_id = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(admin_id)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

/// Overwrite the order's admin assignment. Calling twice with the same admin
/// is equivalent to one call except that `assigned_at` advances.
pub async fn assign_admin(
    pool: &SqlitePool,
    order_id: i64,
    assigned_admin_id: &str,
    assigned_by: &str,
) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE orders SET assigned_admin_id = ?1, assigned_at = ?2, assigned_by = ?3, updated_at = ?2 \
         WHERE id = ?4",
    )
    .bind(assigned_admin_id)
    .bind(now)
    .bind(assigned_by)
    .bind(order_id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {order_id} not found")));
    }
    find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {order_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    fn order_data() -> OrderCreate {
        OrderCreate {
            seller_id: "seller-1".to_string(),
            product_id: 42,
        }
    }

    #[tokio::test]
    async fn test_create_defaults() {
        let pool = test_pool().await;
        let order = create(&pool, "buyer-1", &order_data()).await.unwrap();
        assert_eq!(order.status, "pending");
        assert!(order.assigned_admin_id.is_none());
        assert!(order.assigned_at.is_none());
    }

    #[tokio::test]
    async fn test_assign_admin_idempotent_overwrite() {
        let pool = test_pool().await;
        let order = create(&pool, "buyer-1", &order_data()).await.unwrap();

        let first = assign_admin(&pool, order.id, "admin-1", "admin-root").await.unwrap();
        assert_eq!(first.assigned_admin_id.as_deref(), Some("admin-1"));
        assert_eq!(first.assigned_by.as_deref(), Some("admin-root"));
        let first_at = first.assigned_at.unwrap();

        // Same admin again: state equivalent, assigned_at advances (or stays,
        // within clock resolution), nothing else accumulates
        let second = assign_admin(&pool, order.id, "admin-1", "admin-root").await.unwrap();
        assert_eq!(second.assigned_admin_id.as_deref(), Some("admin-1"));
        assert!(second.assigned_at.unwrap() >= first_at);

        // Re-assignment overwrites, no history kept
        let third = assign_admin(&pool, order.id, "admin-2", "admin-root").await.unwrap();
        assert_eq!(third.assigned_admin_id.as_deref(), Some("admin-2"));
    }

    #[tokio::test]
    async fn test_assign_admin_missing_order() {
        let pool = test_pool().await;
        let err = assign_admin(&pool, 404, "admin-1", "admin-root").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
