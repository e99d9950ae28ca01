use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create profiles table (single source of truth for roles)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            user_id UUID PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            role VARCHAR(32) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_role CHECK (role IN ('admin', 'guide', 'hiker'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create hikes table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS hikes (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            date DATE NOT NULL,
            time TIME NOT NULL,
            duration VARCHAR(64) NOT NULL,
            difficulty VARCHAR(32) NOT NULL,
            price_cents BIGINT NOT NULL,
            max_participants INTEGER NOT NULL,
            guide_id UUID NULL REFERENCES profiles(user_id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_difficulty CHECK (difficulty IN ('easy', 'moderate', 'hard')),
            CONSTRAINT positive_capacity CHECK (max_participants >= 1)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            hike_id UUID NOT NULL REFERENCES hikes(id),
            user_id UUID NOT NULL REFERENCES profiles(user_id),
            date DATE NOT NULL,
            time TIME NOT NULL,
            participants INTEGER NOT NULL,
            status VARCHAR(32) NOT NULL,
            payment_status VARCHAR(32) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_participants CHECK (participants >= 1),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'cancelled', 'completed')),
            CONSTRAINT valid_payment_status CHECK (payment_status IN ('unpaid', 'paid', 'refunded'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create guide_availability table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS guide_availability (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            guide_id UUID NOT NULL REFERENCES profiles(user_id),
            day_of_week SMALLINT NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day CHECK (day_of_week BETWEEN 0 AND 6),
            CONSTRAINT valid_window CHECK (start_time <= end_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes (one statement per query; prepared statements do
    // not accept batches)
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_bookings_hike_date_time ON bookings(hike_id, date, time)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_user_id ON bookings(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_hikes_date ON hikes(date)",
        "CREATE INDEX IF NOT EXISTS idx_hikes_guide_id ON hikes(guide_id)",
        "CREATE INDEX IF NOT EXISTS idx_availability_guide_id ON guide_availability(guide_id)",
        "CREATE INDEX IF NOT EXISTS idx_availability_day ON guide_availability(day_of_week)",
    ];
    for statement in indexes {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
