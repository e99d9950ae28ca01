use crate::models::DbBooking;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Result of the guarded booking insert. Rejections are ordinary values,
/// not errors; the API layer maps them onto its error taxonomy.
#[derive(Debug)]
pub enum CreateBookingOutcome {
    Created(DbBooking),
    HikeNotFound,
    AlreadyBooked,
    CapacityExceeded { remaining: i64 },
}

/// Creates a confirmed booking behind an atomic capacity guard.
///
/// The transaction locks the hike row (`FOR UPDATE`) before re-checking
/// the duplicate and capacity conditions, so concurrent bookings for the
/// same hike serialize and cannot jointly exceed the per-slot capacity.
pub async fn create_booking(
    pool: &Pool<Postgres>,
    hike_id: Uuid,
    user_id: Uuid,
    date: NaiveDate,
    time: NaiveTime,
    participants: i32,
) -> Result<CreateBookingOutcome> {
    let mut tx = pool.begin().await?;

    let max_participants: Option<i32> =
        sqlx::query_scalar("SELECT max_participants FROM hikes WHERE id = $1 FOR UPDATE")
            .bind(hike_id)
            .fetch_optional(&mut *tx)
            .await?;

    let Some(max_participants) = max_participants else {
        return Ok(CreateBookingOutcome::HikeNotFound);
    };

    let duplicate: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM bookings
            WHERE user_id = $1 AND hike_id = $2 AND date = $3 AND time = $4
              AND status = 'confirmed'
        )
        "#,
    )
    .bind(user_id)
    .bind(hike_id)
    .bind(date)
    .bind(time)
    .fetch_one(&mut *tx)
    .await?;

    if duplicate {
        return Ok(CreateBookingOutcome::AlreadyBooked);
    }

    let booked: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(participants), 0)
        FROM bookings
        WHERE hike_id = $1 AND date = $2 AND time = $3 AND status <> 'cancelled'
        "#,
    )
    .bind(hike_id)
    .bind(date)
    .bind(time)
    .fetch_one(&mut *tx)
    .await?;

    let remaining = i64::from(max_participants) - booked;
    if i64::from(participants) > remaining {
        return Ok(CreateBookingOutcome::CapacityExceeded {
            remaining: remaining.max(0),
        });
    }

    let id = Uuid::new_v4();
    let now = Utc::now();

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, hike_id, user_id, date, time, participants, status, payment_status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, 'confirmed', 'unpaid', $7)
        RETURNING id, hike_id, user_id, date, time, participants, status, payment_status, created_at
        "#,
    )
    .bind(id)
    .bind(hike_id)
    .bind(user_id)
    .bind(date)
    .bind(time)
    .bind(participants)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!(
        "Booking created: id={}, hike={}, slot={} {}, participants={}",
        booking.id,
        hike_id,
        date,
        time,
        participants
    );

    Ok(CreateBookingOutcome::Created(booking))
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, hike_id, user_id, date, time, participants, status, payment_status, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

pub async fn get_bookings_by_hike(pool: &Pool<Postgres>, hike_id: Uuid) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, hike_id, user_id, date, time, participants, status, payment_status, created_at
        FROM bookings
        WHERE hike_id = $1
        ORDER BY date ASC, time ASC
        "#,
    )
    .bind(hike_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn get_bookings_by_hike_and_date(
    pool: &Pool<Postgres>,
    hike_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, hike_id, user_id, date, time, participants, status, payment_status, created_at
        FROM bookings
        WHERE hike_id = $1 AND date = $2
        ORDER BY time ASC
        "#,
    )
    .bind(hike_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn get_bookings_by_user(pool: &Pool<Postgres>, user_id: Uuid) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, hike_id, user_id, date, time, participants, status, payment_status, created_at
        FROM bookings
        WHERE user_id = $1
        ORDER BY date ASC, time ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Cancels a booking in place. Rows are never deleted; a paid booking
/// flips to refunded.
pub async fn cancel_booking(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET status = 'cancelled',
            payment_status = CASE WHEN payment_status = 'paid' THEN 'refunded' ELSE payment_status END
        WHERE id = $1 AND status <> 'cancelled'
        RETURNING id, hike_id, user_id, date, time, participants, status, payment_status, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}
