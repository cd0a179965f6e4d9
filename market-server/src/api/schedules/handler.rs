//! Schedule API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::schedule;
use crate::scheduling;
use crate::utils::time::validate_time_window;
use shared::models::{
    Schedule, ScheduleCreate, ScheduleFilter, ScheduleKind, ScheduleSetStatus, ScheduleStatus,
    SlotAvailability,
};
use shared::{AppError, AppResult, ErrorCode};

/// POST /api/schedules - publish a new slot (admin)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ScheduleCreate>,
) -> AppResult<Json<Schedule>> {
    if payload.max_slots < 1 {
        return Err(AppError::with_message(
            ErrorCode::InvalidCapacity,
            format!("max_slots must be at least 1, got {}", payload.max_slots),
        ));
    }
    validate_time_window(&payload.date, &payload.start_time, &payload.end_time)?;

    let s = schedule::create(&state.pool, &user.id, &payload).await?;
    Ok(Json(s))
}

#[derive(Debug, Deserialize)]
pub struct ScheduleListQuery {
    pub kind: Option<ScheduleKind>,
    pub status: Option<ScheduleStatus>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// GET /api/schedules - list the admin's own schedules
pub async fn list_own(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ScheduleListQuery>,
) -> AppResult<Json<Vec<Schedule>>> {
    let filter = ScheduleFilter {
        admin_id: Some(user.id.clone()),
        kind: query.kind,
        status: query.status,
        date_from: query.date_from,
        date_to: query.date_to,
    };
    let schedules = schedule::find_filtered(&state.pool, &filter).await?;
    Ok(Json(schedules))
}

/// PUT /api/schedules/:id/status - activate/deactivate (owner only)
pub async fn set_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ScheduleSetStatus>,
) -> AppResult<Json<Schedule>> {
    let s = schedule::set_status(&state.pool, id, &user.id, payload.status).await?;
    Ok(Json(s))
}

#[derive(Debug, Deserialize)]
pub struct EligibleQuery {
    pub kind: ScheduleKind,
    pub date: Option<String>,
}

/// GET /api/schedules/eligible?kind=&date= - bookable slots for the caller
pub async fn list_eligible(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<EligibleQuery>,
) -> AppResult<Json<Vec<SlotAvailability>>> {
    let slots = scheduling::list_eligible(
        &state.pool,
        &user,
        query.kind,
        None,
        query.date.as_deref(),
    )
    .await?;
    Ok(Json(slots))
}
