use crate::models::DbHike;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use trailbook_core::models::hike::Difficulty;
use uuid::Uuid;

#[allow(clippy::too_many_arguments)]
pub async fn create_hike(
    pool: &Pool<Postgres>,
    name: &str,
    date: NaiveDate,
    time: NaiveTime,
    duration: &str,
    difficulty: Difficulty,
    price_cents: i64,
    max_participants: i32,
) -> Result<DbHike> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating hike: id={}, name={}, date={}, capacity={}",
        id,
        name,
        date,
        max_participants
    );

    let hike = sqlx::query_as::<_, DbHike>(
        r#"
        INSERT INTO hikes (id, name, date, time, duration, difficulty, price_cents, max_participants, guide_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NULL, $9)
        RETURNING id, name, date, time, duration, difficulty, price_cents, max_participants, guide_id, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(date)
    .bind(time)
    .bind(duration)
    .bind(difficulty.to_string())
    .bind(price_cents)
    .bind(max_participants)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(hike)
}

pub async fn get_hike_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbHike>> {
    let hike = sqlx::query_as::<_, DbHike>(
        r#"
        SELECT id, name, date, time, duration, difficulty, price_cents, max_participants, guide_id, created_at
        FROM hikes
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(hike)
}

pub async fn list_hikes(pool: &Pool<Postgres>) -> Result<Vec<DbHike>> {
    let hikes = sqlx::query_as::<_, DbHike>(
        r#"
        SELECT id, name, date, time, duration, difficulty, price_cents, max_participants, guide_id, created_at
        FROM hikes
        ORDER BY date ASC, time ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(hikes)
}

/// Hikes without a guide in the date window, in a fixed order so two
/// batch runs over the same data process identically.
pub async fn list_unassigned_between(
    pool: &Pool<Postgres>,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbHike>> {
    let hikes = sqlx::query_as::<_, DbHike>(
        r#"
        SELECT id, name, date, time, duration, difficulty, price_cents, max_participants, guide_id, created_at
        FROM hikes
        WHERE guide_id IS NULL AND date >= $1 AND date <= $2
        ORDER BY date ASC, time ASC, id ASC
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(hikes)
}

/// All hikes on a date that already have a guide; input to conflict
/// checking.
pub async fn list_assigned_on(pool: &Pool<Postgres>, date: NaiveDate) -> Result<Vec<DbHike>> {
    let hikes = sqlx::query_as::<_, DbHike>(
        r#"
        SELECT id, name, date, time, duration, difficulty, price_cents, max_participants, guide_id, created_at
        FROM hikes
        WHERE guide_id IS NOT NULL AND date = $1
        ORDER BY time ASC
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(hikes)
}

/// Conditionally assigns a guide. The `guide_id IS NULL` predicate makes
/// the write atomic: of two concurrent attempts, exactly one sees the
/// unassigned row and wins.
pub async fn assign_guide(pool: &Pool<Postgres>, hike_id: Uuid, guide_id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE hikes
        SET guide_id = $2
        WHERE id = $1 AND guide_id IS NULL
        "#,
    )
    .bind(hike_id)
    .bind(guide_id)
    .execute(pool)
    .await?;

    let assigned = result.rows_affected() == 1;
    tracing::debug!(
        "Assign guide {} to hike {}: {}",
        guide_id,
        hike_id,
        if assigned { "ok" } else { "lost race or already assigned" }
    );

    Ok(assigned)
}

/// Clears an assignment, but only for the guide who holds it.
pub async fn unassign_guide(pool: &Pool<Postgres>, hike_id: Uuid, guide_id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE hikes
        SET guide_id = NULL
        WHERE id = $1 AND guide_id = $2
        "#,
    )
    .bind(hike_id)
    .bind(guide_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}
