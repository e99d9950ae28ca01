use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use trailbook_core::{
    errors::TrailError,
    models::availability::{AvailabilityResponse, CreateAvailabilityRequest},
};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

async fn require_guide_role(state: &ApiState, user_id: Uuid) -> Result<(), AppError> {
    let role = trailbook_db::repositories::profile::get_role(&state.db_pool, user_id)
        .await
        .map_err(TrailError::Database)?;

    match role.as_deref() {
        Some("guide") => Ok(()),
        Some(_) | None => Err(AppError(TrailError::Authorization(
            "Only guides can manage availability".to_string(),
        ))),
    }
}

#[axum::debug_handler]
pub async fn create_availability(
    State(state): State<Arc<ApiState>>,
    Path(guide_id): Path<Uuid>,
    Json(payload): Json<CreateAvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    if !(0..=6).contains(&payload.day_of_week) {
        return Err(AppError(TrailError::Validation(
            "day_of_week must be between 0 (Sunday) and 6 (Saturday)".to_string(),
        )));
    }
    if payload.start_time > payload.end_time {
        return Err(AppError(TrailError::Validation(
            "Window start must not be after its end".to_string(),
        )));
    }

    require_guide_role(&state, guide_id).await?;

    let window = trailbook_db::repositories::availability::create_availability(
        &state.db_pool,
        guide_id,
        payload.day_of_week,
        payload.start_time,
        payload.end_time,
    )
    .await
    .map_err(TrailError::Database)?;

    Ok(Json(AvailabilityResponse {
        id: window.id,
        day_of_week: window.day_of_week,
        start_time: window.start_time,
        end_time: window.end_time,
    }))
}

#[axum::debug_handler]
pub async fn list_availability(
    State(state): State<Arc<ApiState>>,
    Path(guide_id): Path<Uuid>,
) -> Result<Json<Vec<AvailabilityResponse>>, AppError> {
    let windows = trailbook_db::repositories::availability::get_availability_by_guide(
        &state.db_pool,
        guide_id,
    )
    .await
    .map_err(TrailError::Database)?;

    Ok(Json(
        windows
            .into_iter()
            .map(|w| AvailabilityResponse {
                id: w.id,
                day_of_week: w.day_of_week,
                start_time: w.start_time,
                end_time: w.end_time,
            })
            .collect(),
    ))
}

#[axum::debug_handler]
pub async fn delete_availability(
    State(state): State<Arc<ApiState>>,
    Path((guide_id, window_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = trailbook_db::repositories::availability::delete_availability(
        &state.db_pool,
        window_id,
        guide_id,
    )
    .await
    .map_err(TrailError::Database)?;

    if !deleted {
        return Err(AppError(TrailError::NotFound(format!(
            "Availability window {} not found for this guide",
            window_id
        ))));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
