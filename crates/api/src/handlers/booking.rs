use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use trailbook_core::{
    errors::TrailError,
    models::booking::{BookingResponse, CancelBookingRequest, CreateBookingRequest},
    scheduling::slots,
};
use trailbook_db::repositories::booking::CreateBookingOutcome;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

fn to_response(booking: trailbook_core::models::booking::Booking) -> BookingResponse {
    BookingResponse {
        id: booking.id,
        hike_id: booking.hike_id,
        date: booking.date,
        time: slots::format_slot(booking.time),
        participants: booking.participants,
        status: booking.status,
        payment_status: booking.payment_status,
    }
}

/// Creates a booking.
///
/// Validation happens before any write: participant count, slot label,
/// past dates, and membership of the slot in the hike's mapped list.
/// The capacity and duplicate checks run inside the repository's
/// transaction, so two concurrent bookers cannot jointly exceed
/// capacity.
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    if payload.participants < 1 {
        return Err(AppError(TrailError::Validation(
            "Participants must be at least 1".to_string(),
        )));
    }

    let time = slots::parse_slot(&payload.time).ok_or_else(|| {
        TrailError::Validation(format!("Unrecognized time slot: {}", payload.time))
    })?;

    if payload.date < Utc::now().date_naive() {
        return Err(AppError(TrailError::Validation(
            "Cannot book a past date".to_string(),
        )));
    }

    let db_hike = trailbook_db::repositories::hike::get_hike_by_id(&state.db_pool, payload.hike_id)
        .await
        .map_err(TrailError::Database)?
        .ok_or_else(|| {
            TrailError::NotFound(format!("Hike with ID {} not found", payload.hike_id))
        })?;
    let hike = db_hike.into_domain().map_err(TrailError::Database)?;

    if !slots::map_slots(&hike.duration).contains(&time) {
        return Err(AppError(TrailError::Validation(format!(
            "{} is not a bookable slot for this hike",
            payload.time
        ))));
    }

    let outcome = trailbook_db::repositories::booking::create_booking(
        &state.db_pool,
        payload.hike_id,
        payload.user_id,
        payload.date,
        time,
        payload.participants,
    )
    .await
    .map_err(TrailError::Database)?;

    match outcome {
        CreateBookingOutcome::Created(db_booking) => {
            let booking = db_booking.into_domain().map_err(TrailError::Database)?;
            Ok(Json(to_response(booking)))
        }
        CreateBookingOutcome::HikeNotFound => Err(AppError(TrailError::NotFound(format!(
            "Hike with ID {} not found",
            payload.hike_id
        )))),
        CreateBookingOutcome::AlreadyBooked => Err(AppError(TrailError::AlreadyBooked(format!(
            "{} on {}",
            payload.time, payload.date
        )))),
        CreateBookingOutcome::CapacityExceeded { remaining } => {
            Err(AppError(TrailError::CapacityExceeded(format!(
                "{} spot(s) remaining at {}",
                remaining, payload.time
            ))))
        }
    }
}

/// Cancels the caller's booking. Cancellation never deletes the row;
/// a paid booking is refunded.
#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CancelBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let db_booking = trailbook_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(TrailError::Database)?
        .ok_or_else(|| TrailError::NotFound(format!("Booking with ID {} not found", id)))?;

    if db_booking.user_id != payload.user_id {
        return Err(AppError(TrailError::Authorization(
            "Only the booking holder can cancel it".to_string(),
        )));
    }

    let cancelled = trailbook_db::repositories::booking::cancel_booking(&state.db_pool, id)
        .await
        .map_err(TrailError::Database)?
        .ok_or_else(|| TrailError::Validation("Booking is already cancelled".to_string()))?;

    let booking = cancelled.into_domain().map_err(TrailError::Database)?;
    Ok(Json(to_response(booking)))
}

#[axum::debug_handler]
pub async fn list_user_bookings(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let db_bookings =
        trailbook_db::repositories::booking::get_bookings_by_user(&state.db_pool, user_id)
            .await
            .map_err(TrailError::Database)?;

    let mut bookings = Vec::with_capacity(db_bookings.len());
    for db_booking in db_bookings {
        bookings.push(to_response(
            db_booking.into_domain().map_err(TrailError::Database)?,
        ));
    }

    Ok(Json(bookings))
}
