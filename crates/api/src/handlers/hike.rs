use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use trailbook_core::{
    errors::TrailError,
    models::hike::{CreateHikeRequest, HikeResponse, SlotAvailabilityResponse},
    scheduling::{capacity, slots},
};
use trailbook_db::retry::with_retry;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

fn to_response(hike: trailbook_core::models::hike::Hike) -> HikeResponse {
    HikeResponse {
        id: hike.id,
        name: hike.name,
        date: hike.date,
        time: hike.time,
        duration: hike.duration,
        difficulty: hike.difficulty,
        price_cents: hike.price_cents,
        max_participants: hike.max_participants,
        guide_id: hike.guide_id,
    }
}

#[axum::debug_handler]
pub async fn create_hike(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateHikeRequest>,
) -> Result<Json<HikeResponse>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError(TrailError::Validation(
            "Hike name must not be empty".to_string(),
        )));
    }
    if payload.max_participants < 1 {
        return Err(AppError(TrailError::Validation(
            "Capacity must be at least 1".to_string(),
        )));
    }

    let db_hike = trailbook_db::repositories::hike::create_hike(
        &state.db_pool,
        &payload.name,
        payload.date,
        payload.time,
        &payload.duration,
        payload.difficulty,
        payload.price_cents,
        payload.max_participants,
    )
    .await
    .map_err(TrailError::Database)?;

    let hike = db_hike.into_domain().map_err(TrailError::Database)?;
    Ok(Json(to_response(hike)))
}

#[axum::debug_handler]
pub async fn get_hike(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<HikeResponse>, AppError> {
    let db_hike = trailbook_db::repositories::hike::get_hike_by_id(&state.db_pool, id)
        .await
        .map_err(TrailError::Database)?
        .ok_or_else(|| TrailError::NotFound(format!("Hike with ID {} not found", id)))?;

    let hike = db_hike.into_domain().map_err(TrailError::Database)?;
    Ok(Json(to_response(hike)))
}

#[axum::debug_handler]
pub async fn list_hikes(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<HikeResponse>>, AppError> {
    let db_hikes = trailbook_db::repositories::hike::list_hikes(&state.db_pool)
        .await
        .map_err(TrailError::Database)?;

    let mut hikes = Vec::with_capacity(db_hikes.len());
    for db_hike in db_hikes {
        hikes.push(to_response(
            db_hike.into_domain().map_err(TrailError::Database)?,
        ));
    }

    Ok(Json(hikes))
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
}

/// Bookable slots for a hike on a date.
///
/// The mapper derives the hike's slot list from its duration; the
/// aggregator drops slots without remaining capacity. A storage failure
/// surfaces as an error rather than an empty slot list, so callers can
/// tell "fully booked" apart from "we don't know".
#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<SlotAvailabilityResponse>, AppError> {
    let db_hike = trailbook_db::repositories::hike::get_hike_by_id(&state.db_pool, id)
        .await
        .map_err(TrailError::Database)?
        .ok_or_else(|| TrailError::NotFound(format!("Hike with ID {} not found", id)))?;
    let hike = db_hike.into_domain().map_err(TrailError::Database)?;

    let db_bookings = with_retry("get_bookings_by_hike_and_date", || {
        trailbook_db::repositories::booking::get_bookings_by_hike_and_date(
            &state.db_pool,
            id,
            query.date,
        )
    })
    .await
    .map_err(TrailError::Database)?;

    let mut bookings = Vec::with_capacity(db_bookings.len());
    for db_booking in db_bookings {
        bookings.push(db_booking.into_domain().map_err(TrailError::Database)?);
    }

    let open = capacity::available_slots(
        &hike.duration,
        hike.max_participants,
        &bookings,
        query.date,
    );
    let fully_booked = capacity::is_date_fully_booked(
        &hike.duration,
        hike.max_participants,
        &bookings,
        query.date,
    );

    Ok(Json(SlotAvailabilityResponse {
        hike_id: id,
        date: query.date,
        slots: open.into_iter().map(slots::format_slot).collect(),
        fully_booked,
    }))
}
