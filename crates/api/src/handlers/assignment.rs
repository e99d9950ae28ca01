//! # Guide Assignment Handlers
//!
//! Manual guide self-assignment plus the auto-assign batch that pairs
//! unassigned near-term hikes with available guides.
//!
//! ## Auto-Assignment Algorithm
//!
//! For each unassigned hike in the window, in date/time order:
//!
//! 1. Fetch the availability windows for the hike's day-of-week and keep
//!    those covering its start hour (hour-level comparison only).
//! 2. Verify each candidate still holds the guide role, since
//!    availability rows can outlive a role change.
//! 3. Drop candidates whose existing assignments on that date overlap
//!    the hike's occupied interval (difficulty heuristic: easy=1h,
//!    moderate=2h, hard=3h).
//! 4. Assign the first surviving candidate via a conditional update;
//!    first-match selection is deterministic by design.
//!
//! A hike that cannot be assigned gets a reason in the result list and
//! the batch moves on; one failure never aborts the rest.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Duration, Timelike, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use trailbook_core::{
    errors::TrailError,
    models::{
        assignment::{AssignGuideRequest, AssignmentResult, AutoAssignResponse},
        hike::Hike,
    },
    scheduling::{assign, assign::SkipReason, conflict},
};
use trailbook_db::retry::with_retry;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Default look-ahead for the interactive trigger; the scheduled binary
/// passes a broader window.
const DEFAULT_WINDOW_DAYS: i64 = 2;

/// Upper bound on the look-ahead window. Keeps the date arithmetic in
/// range; chrono panics on overflowing additions.
pub const MAX_WINDOW_DAYS: i64 = 365;

#[derive(Debug, Deserialize)]
pub struct AutoAssignQuery {
    pub days: Option<i64>,
}

/// Runs the auto-assign batch over hikes starting within `window_days`.
///
/// Shared by the HTTP trigger and the standalone `auto-assign` binary.
pub async fn run_auto_assign(
    pool: &PgPool,
    window_days: i64,
) -> Result<Vec<AssignmentResult>, TrailError> {
    if !(0..=MAX_WINDOW_DAYS).contains(&window_days) {
        return Err(TrailError::Validation(format!(
            "days must be between 0 and {}",
            MAX_WINDOW_DAYS
        )));
    }

    let today = Utc::now().date_naive();
    let until = today + Duration::days(window_days);

    let unassigned = with_retry("list_unassigned_hikes", || {
        trailbook_db::repositories::hike::list_unassigned_between(pool, today, until)
    })
    .await
    .map_err(TrailError::Database)?;

    tracing::info!(
        "Auto-assign batch: {} unassigned hike(s) between {} and {}",
        unassigned.len(),
        today,
        until
    );

    let mut results = Vec::with_capacity(unassigned.len());
    for db_hike in unassigned {
        let hike_id = db_hike.id;
        let hike_name = db_hike.name.clone();

        // Per-hike isolation: a bad row or failed write records a reason
        // and the batch continues.
        let outcome = match db_hike.into_domain() {
            Ok(hike) => assign_one(pool, &hike).await,
            Err(err) => {
                tracing::warn!("Skipping malformed hike row {}: {}", hike_id, err);
                Err(SkipReason::DatabaseError)
            }
        };

        results.push(match outcome {
            Ok(guide_id) => AssignmentResult {
                hike_id,
                hike_name,
                assigned: true,
                guide_id: Some(guide_id),
                reason: None,
            },
            Err(reason) => AssignmentResult {
                hike_id,
                hike_name,
                assigned: false,
                guide_id: None,
                reason: Some(reason.to_string()),
            },
        });
    }

    Ok(results)
}

/// Attempts to assign one hike. Storage failures map to the
/// `DatabaseError` reason rather than propagating.
async fn assign_one(pool: &PgPool, hike: &Hike) -> Result<Uuid, SkipReason> {
    let dow = assign::day_of_week(hike.date);

    let db_windows = trailbook_db::repositories::availability::get_windows_for_day(pool, dow)
        .await
        .map_err(|err| {
            tracing::warn!("Failed to load availability for hike {}: {}", hike.id, err);
            SkipReason::DatabaseError
        })?;
    let windows: Vec<_> = db_windows.into_iter().map(|w| w.into_domain()).collect();

    // Verify the guide role for every candidate in one query.
    let candidate_ids: Vec<Uuid> = windows
        .iter()
        .map(|w| w.guide_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let verified: HashSet<Uuid> =
        trailbook_db::repositories::profile::filter_verified_guides(pool, &candidate_ids)
            .await
            .map_err(|err| {
                tracing::warn!("Role lookup failed for hike {}: {}", hike.id, err);
                SkipReason::DatabaseError
            })?
            .into_iter()
            .collect();

    let assigned_rows = trailbook_db::repositories::hike::list_assigned_on(pool, hike.date)
        .await
        .map_err(|err| {
            tracing::warn!("Failed to load assignments for hike {}: {}", hike.id, err);
            SkipReason::DatabaseError
        })?;
    let mut assigned_hikes = Vec::with_capacity(assigned_rows.len());
    for row in assigned_rows {
        match row.into_domain() {
            Ok(h) => assigned_hikes.push(h),
            Err(err) => {
                tracing::warn!("Ignoring malformed assigned hike row: {}", err);
            }
        }
    }

    let guide_id = assign::select_guide(hike, &windows, &verified, &assigned_hikes)?;

    match trailbook_db::repositories::hike::assign_guide(pool, hike.id, guide_id).await {
        Ok(true) => {
            tracing::info!("Assigned guide {} to hike {}", guide_id, hike.id);
            Ok(guide_id)
        }
        Ok(false) => {
            // A concurrent invocation won the conditional update.
            tracing::warn!("Hike {} was assigned concurrently", hike.id);
            Err(SkipReason::DatabaseError)
        }
        Err(err) => {
            tracing::warn!("Failed to write assignment for hike {}: {}", hike.id, err);
            Err(SkipReason::DatabaseError)
        }
    }
}

/// Interactive batch trigger. `?days=` widens the default two-day window.
#[axum::debug_handler]
pub async fn auto_assign(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AutoAssignQuery>,
) -> Result<Json<AutoAssignResponse>, AppError> {
    let window_days = query.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    let results = run_auto_assign(&state.db_pool, window_days).await?;
    Ok(Json(AutoAssignResponse { results }))
}

/// Guide self-assignment. Same conflict rule as the batch; availability
/// is only enforced when the guide has windows configured (or always,
/// when the permissive cold-start policy is off).
#[axum::debug_handler]
pub async fn assign_self(
    State(state): State<Arc<ApiState>>,
    Path(hike_id): Path<Uuid>,
    Json(payload): Json<AssignGuideRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let guide_id = payload.guide_id;

    let role = trailbook_db::repositories::profile::get_role(&state.db_pool, guide_id)
        .await
        .map_err(TrailError::Database)?;
    if role.as_deref() != Some("guide") {
        return Err(AppError(TrailError::Authorization(
            "Only guides can take assignments".to_string(),
        )));
    }

    let db_hike = trailbook_db::repositories::hike::get_hike_by_id(&state.db_pool, hike_id)
        .await
        .map_err(TrailError::Database)?
        .ok_or_else(|| TrailError::NotFound(format!("Hike with ID {} not found", hike_id)))?;
    let hike = db_hike.into_domain().map_err(TrailError::Database)?;

    if hike.guide_id.is_some() {
        return Err(AppError(TrailError::Conflict(
            "Hike already has a guide".to_string(),
        )));
    }

    let has_windows = trailbook_db::repositories::availability::guide_has_availability(
        &state.db_pool,
        guide_id,
    )
    .await
    .map_err(TrailError::Database)?;

    if has_windows {
        let dow = assign::day_of_week(hike.date);
        let windows =
            trailbook_db::repositories::availability::get_windows_for_day(&state.db_pool, dow)
                .await
                .map_err(TrailError::Database)?;
        let covered = windows
            .into_iter()
            .map(|w| w.into_domain())
            .filter(|w| w.guide_id == guide_id)
            .any(|w| assign::window_covers(&w, hike.time.hour()));
        if !covered {
            return Err(AppError(TrailError::Conflict(
                "You are not available at the hike's start time".to_string(),
            )));
        }
    } else if !state.permissive_assignment {
        return Err(AppError(TrailError::Conflict(
            "No availability configured for this guide".to_string(),
        )));
    }

    let assigned_rows =
        trailbook_db::repositories::hike::list_assigned_on(&state.db_pool, hike.date)
            .await
            .map_err(TrailError::Database)?;
    for row in assigned_rows {
        let existing = row.into_domain().map_err(TrailError::Database)?;
        if existing.guide_id == Some(guide_id) && conflict::conflicts_with(&hike, &existing) {
            return Err(AppError(TrailError::Conflict(format!(
                "You already lead \"{}\" at an overlapping time",
                existing.name
            ))));
        }
    }

    let assigned =
        trailbook_db::repositories::hike::assign_guide(&state.db_pool, hike_id, guide_id)
            .await
            .map_err(TrailError::Database)?;
    if !assigned {
        return Err(AppError(TrailError::Conflict(
            "Hike was assigned to another guide first".to_string(),
        )));
    }

    Ok(Json(serde_json::json!({ "assigned": true, "guide_id": guide_id })))
}

/// Clears the caller's own assignment; another guide's assignment stays.
#[axum::debug_handler]
pub async fn unassign_self(
    State(state): State<Arc<ApiState>>,
    Path(hike_id): Path<Uuid>,
    Json(payload): Json<AssignGuideRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let db_hike = trailbook_db::repositories::hike::get_hike_by_id(&state.db_pool, hike_id)
        .await
        .map_err(TrailError::Database)?
        .ok_or_else(|| TrailError::NotFound(format!("Hike with ID {} not found", hike_id)))?;

    match db_hike.guide_id {
        None => {
            return Err(AppError(TrailError::Validation(
                "Hike has no guide assigned".to_string(),
            )))
        }
        Some(current) if current != payload.guide_id => {
            return Err(AppError(TrailError::Authorization(
                "Only the assigned guide can clear this assignment".to_string(),
            )))
        }
        Some(_) => {}
    }

    let cleared =
        trailbook_db::repositories::hike::unassign_guide(&state.db_pool, hike_id, payload.guide_id)
            .await
            .map_err(TrailError::Database)?;
    if !cleared {
        return Err(AppError(TrailError::Conflict(
            "Assignment changed concurrently".to_string(),
        )));
    }

    Ok(Json(serde_json::json!({ "assigned": false })))
}
