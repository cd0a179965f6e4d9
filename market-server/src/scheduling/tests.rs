//! End-to-end scenario tests for the scheduling core: eligibility gating,
//! availability projection, booking capacity, and status transitions.

use crate::auth::CurrentUser;
use crate::db::repository::{PICKUPS, order, schedule};
use crate::scheduling::{
    assign_admin_to_order, create_booking, list_eligible, transition_booking_status,
};
use shared::models::{
    Booking, BookingCreate, BookingStatus, BookingStatusUpdate, Order, OrderAssign, OrderCreate,
    Role, Schedule, ScheduleCreate, ScheduleKind, ScheduleStatus,
};
use shared::ErrorCode;
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    crate::db::MIGRATOR.run(&pool).await.unwrap();
    pool
}

fn user(id: &str, role: Role) -> CurrentUser {
    CurrentUser {
        id: id.to_string(),
        username: id.to_string(),
        role,
    }
}

async fn seed_order(pool: &SqlitePool, buyer: &str, seller: &str, product_id: i64) -> Order {
    order::create(
        pool,
        buyer,
        &OrderCreate {
            seller_id: seller.to_string(),
            product_id,
        },
    )
    .await
    .unwrap()
}

async fn seed_schedule(
    pool: &SqlitePool,
    admin: &str,
    kind: ScheduleKind,
    date: &str,
    max_slots: i64,
) -> Schedule {
    schedule::create(
        pool,
        admin,
        &ScheduleCreate {
            kind,
            date: date.to_string(),
            start_time: "10:00".to_string(),
            end_time: "12:00".to_string(),
            max_slots,
        },
    )
    .await
    .unwrap()
}

async fn assign(pool: &SqlitePool, order_id: i64, admin_id: &str) -> Order {
    assign_admin_to_order(
        pool,
        &user(admin_id, Role::Admin),
        order_id,
        &OrderAssign {
            assigned_admin_id: admin_id.to_string(),
        },
    )
    .await
    .unwrap()
}

/// Book a delivery slot for the seller's order and mark it completed.
async fn complete_delivery(
    pool: &SqlitePool,
    seller: &CurrentUser,
    admin: &CurrentUser,
    schedule_id: i64,
    order_id: i64,
) -> Booking {
    let booking = create_booking(
        pool,
        seller,
        ScheduleKind::Delivery,
        &BookingCreate {
            schedule_id,
            order_id,
        },
    )
    .await
    .unwrap();

    transition_booking_status(
        pool,
        admin,
        ScheduleKind::Delivery,
        booking.id,
        &BookingStatusUpdate {
            status: "completed".to_string(),
            admin_notes: None,
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_unassigned_buyer_sees_no_schedules() {
    let pool = test_pool().await;
    let buyer = user("buyer-1", Role::Buyer);

    // Order exists but no admin is assigned; schedules exist system-wide
    seed_order(&pool, "buyer-1", "seller-1", 7).await;
    seed_schedule(&pool, "admin-1", ScheduleKind::Pickup, "2024-05-01", 5).await;
    seed_schedule(&pool, "admin-2", ScheduleKind::Pickup, "2024-05-01", 5).await;

    let slots = list_eligible(&pool, &buyer, ScheduleKind::Pickup, None, None)
        .await
        .unwrap();
    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_malformed_date_filter_rejected() {
    let pool = test_pool().await;
    let seller = user("seller-1", Role::Seller);

    // A wrong-format date must surface as a validation error, not an
    // empty listing that looks like "nothing eligible"
    let err = list_eligible(
        &pool,
        &seller,
        ScheduleKind::Delivery,
        None,
        Some("05/01/2024"),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);

    let err = list_eligible(
        &pool,
        &seller,
        ScheduleKind::Delivery,
        None,
        Some("2024-13-40"),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
}

#[tokio::test]
async fn test_buyer_without_completed_delivery_sees_no_pickups() {
    let pool = test_pool().await;
    let buyer = user("buyer-1", Role::Buyer);

    let o = seed_order(&pool, "buyer-1", "seller-1", 7).await;
    assign(&pool, o.id, "admin-1").await;
    seed_schedule(&pool, "admin-1", ScheduleKind::Pickup, "2024-05-01", 5).await;

    // Free capacity, assigned admin, but no completed delivery yet
    let slots = list_eligible(&pool, &buyer, ScheduleKind::Pickup, None, None)
        .await
        .unwrap();
    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_seller_is_not_reciprocally_gated() {
    let pool = test_pool().await;
    let seller = user("seller-1", Role::Seller);

    let o = seed_order(&pool, "buyer-1", "seller-1", 7).await;
    assign(&pool, o.id, "admin-1").await;
    let s = seed_schedule(&pool, "admin-1", ScheduleKind::Delivery, "2024-05-01", 5).await;

    // No completion requirement of any kind on the seller side
    let slots = list_eligible(&pool, &seller, ScheduleKind::Delivery, None, None)
        .await
        .unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].schedule.id, s.id);
    assert_eq!(slots[0].available_slots, 5);
}

#[tokio::test]
async fn test_role_kind_pairs_outside_policy_are_forbidden() {
    let pool = test_pool().await;

    let err = list_eligible(
        &pool,
        &user("buyer-1", Role::Buyer),
        ScheduleKind::Delivery,
        None,
        None,
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    let err = list_eligible(
        &pool,
        &user("seller-1", Role::Seller),
        ScheduleKind::Pickup,
        None,
        None,
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);
}

#[tokio::test]
async fn test_pickup_lifecycle_fills_and_disappears() {
    let pool = test_pool().await;
    let admin = user("admin-1", Role::Admin);
    let buyer = user("buyer-1", Role::Buyer);
    let seller = user("seller-1", Role::Seller);

    let o = seed_order(&pool, "buyer-1", "seller-1", 7).await;
    assign(&pool, o.id, "admin-1").await;

    let dsched = seed_schedule(&pool, "admin-1", ScheduleKind::Delivery, "2024-05-01", 5).await;
    complete_delivery(&pool, &seller, &admin, dsched.id, o.id).await;

    let psched = seed_schedule(&pool, "admin-1", ScheduleKind::Pickup, "2024-05-02", 2).await;

    // Gate passes now; full capacity advertised
    let slots = list_eligible(&pool, &buyer, ScheduleKind::Pickup, None, None)
        .await
        .unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].schedule.id, psched.id);
    assert_eq!(slots[0].occupancy, 0);
    assert_eq!(slots[0].available_slots, 2);
    assert!(slots[0].is_available);

    // Two bookings fill the slot (no uniqueness on (schedule, order))
    for _ in 0..2 {
        create_booking(
            &pool,
            &buyer,
            ScheduleKind::Pickup,
            &BookingCreate {
                schedule_id: psched.id,
                order_id: o.id,
            },
        )
        .await
        .unwrap();
    }

    let err = create_booking(
        &pool,
        &buyer,
        ScheduleKind::Pickup,
        &BookingCreate {
            schedule_id: psched.id,
            order_id: o.id,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::CapacityExceeded);

    // Filter-don't-flag: the full schedule vanishes from the listing
    let slots = list_eligible(&pool, &buyer, ScheduleKind::Pickup, None, None)
        .await
        .unwrap();
    assert!(slots.is_empty());
    assert_eq!(
        PICKUPS.count_for_schedule(&pool, psched.id).await.unwrap(),
        2
    );
}

#[tokio::test]
async fn test_completion_gate_is_cross_order() {
    let pool = test_pool().await;
    let admin = user("admin-1", Role::Admin);
    let buyer = user("buyer-1", Role::Buyer);
    let seller = user("seller-1", Role::Seller);

    // Another buyer's order for product 7 gets delivered and completed
    let other = seed_order(&pool, "buyer-2", "seller-1", 7).await;
    assign(&pool, other.id, "admin-1").await;
    let dsched = seed_schedule(&pool, "admin-1", ScheduleKind::Delivery, "2024-05-01", 5).await;
    complete_delivery(&pool, &seller, &admin, dsched.id, other.id).await;

    // buyer-1 ordered the same product under the same admin; the proxy
    // check passes even though buyer-1's own order was never delivered
    let own = seed_order(&pool, "buyer-1", "seller-1", 7).await;
    assign(&pool, own.id, "admin-1").await;
    seed_schedule(&pool, "admin-1", ScheduleKind::Pickup, "2024-05-02", 3).await;

    let slots = list_eligible(&pool, &buyer, ScheduleKind::Pickup, None, None)
        .await
        .unwrap();
    assert_eq!(slots.len(), 1);
}

#[tokio::test]
async fn test_booking_requires_matching_participant_and_admin() {
    let pool = test_pool().await;
    let o = seed_order(&pool, "buyer-1", "seller-1", 7).await;
    assign(&pool, o.id, "admin-1").await;
    let psched = seed_schedule(&pool, "admin-1", ScheduleKind::Pickup, "2024-05-01", 2).await;
    let foreign = seed_schedule(&pool, "admin-2", ScheduleKind::Pickup, "2024-05-01", 2).await;

    // Someone else's order
    let err = create_booking(
        &pool,
        &user("buyer-2", Role::Buyer),
        ScheduleKind::Pickup,
        &BookingCreate {
            schedule_id: psched.id,
            order_id: o.id,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotOrderParticipant);

    // Schedule owned by an admin other than the assigned one
    let err = create_booking(
        &pool,
        &user("buyer-1", Role::Buyer),
        ScheduleKind::Pickup,
        &BookingCreate {
            schedule_id: foreign.id,
            order_id: o.id,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);
}

#[tokio::test]
async fn test_booking_unassigned_order_rejected() {
    let pool = test_pool().await;
    let o = seed_order(&pool, "buyer-1", "seller-1", 7).await;
    let psched = seed_schedule(&pool, "admin-1", ScheduleKind::Pickup, "2024-05-01", 2).await;

    let err = create_booking(
        &pool,
        &user("buyer-1", Role::Buyer),
        ScheduleKind::Pickup,
        &BookingCreate {
            schedule_id: psched.id,
            order_id: o.id,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotAssigned);
}

#[tokio::test]
async fn test_booking_inactive_schedule_rejected() {
    let pool = test_pool().await;
    let o = seed_order(&pool, "buyer-1", "seller-1", 7).await;
    assign(&pool, o.id, "admin-1").await;
    let psched = seed_schedule(&pool, "admin-1", ScheduleKind::Pickup, "2024-05-01", 2).await;
    schedule::set_status(&pool, psched.id, "admin-1", ScheduleStatus::Inactive)
        .await
        .unwrap();

    let err = create_booking(
        &pool,
        &user("buyer-1", Role::Buyer),
        ScheduleKind::Pickup,
        &BookingCreate {
            schedule_id: psched.id,
            order_id: o.id,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ScheduleInactive);

    // Deactivation hides but never deletes
    assert!(schedule::find_by_id(&pool, psched.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_unknown_status_leaves_booking_unchanged() {
    let pool = test_pool().await;
    let admin = user("admin-1", Role::Admin);
    let o = seed_order(&pool, "buyer-1", "seller-1", 7).await;
    assign(&pool, o.id, "admin-1").await;
    let psched = seed_schedule(&pool, "admin-1", ScheduleKind::Pickup, "2024-05-01", 2).await;

    let booking = create_booking(
        &pool,
        &user("buyer-1", Role::Buyer),
        ScheduleKind::Pickup,
        &BookingCreate {
            schedule_id: psched.id,
            order_id: o.id,
        },
    )
    .await
    .unwrap();

    let err = transition_booking_status(
        &pool,
        &admin,
        ScheduleKind::Pickup,
        booking.id,
        &BookingStatusUpdate {
            status: "flying".to_string(),
            admin_notes: Some("should not land".to_string()),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidBookingStatus);

    let unchanged = PICKUPS.find_by_id(&pool, booking.id).await.unwrap().unwrap();
    assert_eq!(unchanged.status, BookingStatus::Pending);
    assert_eq!(unchanged.admin_notes, None);
}

#[tokio::test]
async fn test_in_progress_only_valid_for_pickups() {
    let pool = test_pool().await;
    let admin = user("admin-1", Role::Admin);
    let seller = user("seller-1", Role::Seller);
    let o = seed_order(&pool, "buyer-1", "seller-1", 7).await;
    assign(&pool, o.id, "admin-1").await;
    let dsched = seed_schedule(&pool, "admin-1", ScheduleKind::Delivery, "2024-05-01", 2).await;

    let booking = create_booking(
        &pool,
        &seller,
        ScheduleKind::Delivery,
        &BookingCreate {
            schedule_id: dsched.id,
            order_id: o.id,
        },
    )
    .await
    .unwrap();

    let err = transition_booking_status(
        &pool,
        &admin,
        ScheduleKind::Delivery,
        booking.id,
        &BookingStatusUpdate {
            status: "in_progress".to_string(),
            admin_notes: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidBookingStatus);
}

#[tokio::test]
async fn test_assign_is_idempotent_overwrite() {
    let pool = test_pool().await;
    let actor = user("admin-9", Role::Admin);
    let o = seed_order(&pool, "buyer-1", "seller-1", 7).await;

    let first = assign_admin_to_order(
        &pool,
        &actor,
        o.id,
        &OrderAssign {
            assigned_admin_id: "admin-1".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(first.assigned_admin_id.as_deref(), Some("admin-1"));
    assert_eq!(first.assigned_by.as_deref(), Some("admin-9"));

    let second = assign_admin_to_order(
        &pool,
        &actor,
        o.id,
        &OrderAssign {
            assigned_admin_id: "admin-1".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(second.assigned_admin_id.as_deref(), Some("admin-1"));
    assert!(second.assigned_at.unwrap() >= first.assigned_at.unwrap());

    // Reassignment overwrites, keeping no history
    let third = assign_admin_to_order(
        &pool,
        &actor,
        o.id,
        &OrderAssign {
            assigned_admin_id: "admin-2".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(third.assigned_admin_id.as_deref(), Some("admin-2"));
}

/// Capacity hammer: 2N concurrent booking attempts against an N-slot
/// schedule must produce exactly N bookings, with every loser seeing
/// CapacityExceeded. Uses a file-backed WAL database so writers actually
/// contend across pool connections.
#[tokio::test]
async fn test_concurrent_bookings_never_overbook() {
    const N: i64 = 4;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("hammer.db");
    let db = crate::db::DbService::new(&db_path.to_string_lossy())
        .await
        .unwrap();
    let pool = db.pool;

    let o = seed_order(&pool, "buyer-1", "seller-1", 7).await;
    assign(&pool, o.id, "admin-1").await;
    let psched = seed_schedule(&pool, "admin-1", ScheduleKind::Pickup, "2024-05-01", N).await;

    let mut handles = Vec::new();
    for _ in 0..(2 * N) {
        let pool = pool.clone();
        let order_id = o.id;
        let schedule_id = psched.id;
        handles.push(tokio::spawn(async move {
            create_booking(
                &pool,
                &CurrentUser {
                    id: "buyer-1".to_string(),
                    username: "buyer-1".to_string(),
                    role: Role::Buyer,
                },
                ScheduleKind::Pickup,
                &BookingCreate {
                    schedule_id,
                    order_id,
                },
            )
            .await
        }));
    }

    let mut successes = 0;
    for result in futures::future::join_all(handles).await {
        match result.unwrap() {
            Ok(_) => successes += 1,
            Err(e) => assert_eq!(e.code, ErrorCode::CapacityExceeded),
        }
    }

    assert_eq!(successes, N);
    assert_eq!(
        PICKUPS.count_for_schedule(&pool, psched.id).await.unwrap(),
        N
    );
}
