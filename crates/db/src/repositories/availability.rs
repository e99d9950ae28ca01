use crate::models::DbGuideAvailability;
use chrono::{NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_availability(
    pool: &Pool<Postgres>,
    guide_id: Uuid,
    day_of_week: i16,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<DbGuideAvailability> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating availability window: guide={}, day={}, {}-{}",
        guide_id,
        day_of_week,
        start_time,
        end_time
    );

    let window = sqlx::query_as::<_, DbGuideAvailability>(
        r#"
        INSERT INTO guide_availability (id, guide_id, day_of_week, start_time, end_time, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, guide_id, day_of_week, start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(guide_id)
    .bind(day_of_week)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(window)
}

pub async fn get_availability_by_guide(
    pool: &Pool<Postgres>,
    guide_id: Uuid,
) -> Result<Vec<DbGuideAvailability>> {
    let windows = sqlx::query_as::<_, DbGuideAvailability>(
        r#"
        SELECT id, guide_id, day_of_week, start_time, end_time, created_at
        FROM guide_availability
        WHERE guide_id = $1
        ORDER BY day_of_week ASC, start_time ASC
        "#,
    )
    .bind(guide_id)
    .fetch_all(pool)
    .await?;

    Ok(windows)
}

/// All windows for a day of week. Creation order keeps auto-assign
/// candidate selection deterministic.
pub async fn get_windows_for_day(
    pool: &Pool<Postgres>,
    day_of_week: i16,
) -> Result<Vec<DbGuideAvailability>> {
    let windows = sqlx::query_as::<_, DbGuideAvailability>(
        r#"
        SELECT id, guide_id, day_of_week, start_time, end_time, created_at
        FROM guide_availability
        WHERE day_of_week = $1
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(day_of_week)
    .fetch_all(pool)
    .await?;

    Ok(windows)
}

/// Whether a guide has any availability configured at all. Drives the
/// permissive cold-start policy for manual self-assignment.
pub async fn guide_has_availability(pool: &Pool<Postgres>, guide_id: Uuid) -> Result<bool> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM guide_availability WHERE guide_id = $1)")
            .bind(guide_id)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}

/// Deletes a window, but only if it belongs to the requesting guide.
pub async fn delete_availability(
    pool: &Pool<Postgres>,
    window_id: Uuid,
    guide_id: Uuid,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM guide_availability
        WHERE id = $1 AND guide_id = $2
        "#,
    )
    .bind(window_id)
    .bind(guide_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}
