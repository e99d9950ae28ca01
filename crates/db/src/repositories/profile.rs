use crate::models::DbProfile;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use trailbook_core::models::profile::Role;
use uuid::Uuid;

pub async fn create_profile(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    name: &str,
    role: Role,
) -> Result<DbProfile> {
    let now = Utc::now();

    let profile = sqlx::query_as::<_, DbProfile>(
        r#"
        INSERT INTO profiles (user_id, name, role, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING user_id, name, role, created_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(role.to_string())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

pub async fn get_profile(pool: &Pool<Postgres>, user_id: Uuid) -> Result<Option<DbProfile>> {
    let profile = sqlx::query_as::<_, DbProfile>(
        r#"
        SELECT user_id, name, role, created_at
        FROM profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

/// The one role lookup. Every authorization decision funnels through
/// this query instead of caching role state elsewhere.
pub async fn get_role(pool: &Pool<Postgres>, user_id: Uuid) -> Result<Option<String>> {
    let role: Option<String> = sqlx::query_scalar("SELECT role FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(role)
}

/// Filters a candidate set down to users who actually hold the guide
/// role. Availability rows can outlive a role change.
pub async fn filter_verified_guides(
    pool: &Pool<Postgres>,
    candidate_ids: &[Uuid],
) -> Result<Vec<Uuid>> {
    let verified: Vec<Uuid> = sqlx::query_scalar(
        r#"
        SELECT user_id FROM profiles
        WHERE user_id = ANY($1) AND role = 'guide'
        "#,
    )
    .bind(candidate_ids)
    .fetch_all(pool)
    .await?;

    Ok(verified)
}
