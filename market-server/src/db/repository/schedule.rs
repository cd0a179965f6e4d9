//! Schedule Repository
//!
//! The schedule registry: admin-owned, capacity-bounded slots. `max_slots`
//! is fixed at creation; only `status` can change afterwards, and only by
//! the owning admin. Schedules are never deleted.

use super::{RepoError, RepoResult};
use shared::models::{Schedule, ScheduleCreate, ScheduleFilter, ScheduleStatus};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const SELECT_LIST: &str =
    "id, admin_id, kind, date, start_time, end_time, max_slots, status, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Schedule>> {
    let schedule = sqlx::query_as::<_, Schedule>(&format!(
        "SELECT {SELECT_LIST} FROM schedule WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(schedule)
}

pub async fn create(pool: &SqlitePool, admin_id: &str, data: &ScheduleCreate) -> RepoResult<Schedule> {
    if data.max_slots < 1 {
        return Err(RepoError::Validation(format!(
            "max_slots must be at least 1, got {}",
            data.max_slots
        )));
    }

    let now = shared::util::now_millis();
    let schedule = sqlx::query_as::<_, Schedule>(&format!(
        "INSERT INTO schedule (admin_id, kind, date, start_time, end_time, max_slots, status, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'active', ?7, ?7) RETURNING {SELECT_LIST}"
    ))
    .bind(admin_id)
    .bind(data.kind)
    .bind(&data.date)
    .bind(&data.start_time)
    .bind(&data.end_time)
    .bind(data.max_slots)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(schedule)
}

pub async fn find_filtered(pool: &SqlitePool, filter: &ScheduleFilter) -> RepoResult<Vec<Schedule>> {
    let mut qb: QueryBuilder<'_, Sqlite> =
        QueryBuilder::new(format!("SELECT {SELECT_LIST} FROM schedule WHERE 1 = 1"));

    if let Some(admin_id) = &filter.admin_id {
        qb.push(" AND admin_id = ").push_bind(admin_id);
    }
    if let Some(kind) = filter.kind {
        qb.push(" AND kind = ").push_bind(kind);
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(from) = &filter.date_from {
        qb.push(" AND date >= ").push_bind(from);
    }
    if let Some(to) = &filter.date_to {
        qb.push(" AND date <= ").push_bind(to);
    }
    qb.push(" ORDER BY date, start_time, id");

    let schedules = qb.build_query_as::<Schedule>().fetch_all(pool).await?;
    Ok(schedules)
}

/// Toggle active/inactive. Owner-scoped: the WHERE clause binds the admin so
/// a non-owner update affects zero rows.
pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    admin_id: &str,
    status: ScheduleStatus,
) -> RepoResult<Schedule> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE schedule SET status = ?1, updated_at = ?2 WHERE id = ?3 AND admin_id = ?4")
        .bind(status)
        .bind(now)
        .bind(id)
        .bind(admin_id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Schedule {id} not found or not owned by this admin"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Schedule {id} not found")))
}
