use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::Result;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trailbook_core::models::{
    availability::GuideAvailability,
    booking::{Booking, BookingStatus, PaymentStatus},
    hike::{Difficulty, Hike},
    profile::{Profile, Role},
};
use uuid::Uuid;

// Status and role columns are stored as TEXT; conversion into the core
// enums happens here so sqlx stays out of the core crate.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbHike {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: String,
    pub difficulty: String,
    pub price_cents: i64,
    pub max_participants: i32,
    pub guide_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl DbHike {
    pub fn into_domain(self) -> Result<Hike> {
        Ok(Hike {
            id: self.id,
            name: self.name,
            date: self.date,
            time: self.time,
            duration: self.duration,
            difficulty: Difficulty::from_str(&self.difficulty)?,
            price_cents: self.price_cents,
            max_participants: self.max_participants,
            guide_id: self.guide_id,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub hike_id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub participants: i32,
    pub status: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

impl DbBooking {
    pub fn into_domain(self) -> Result<Booking> {
        Ok(Booking {
            id: self.id,
            hike_id: self.hike_id,
            user_id: self.user_id,
            date: self.date,
            time: self.time,
            participants: self.participants,
            status: BookingStatus::from_str(&self.status)?,
            payment_status: PaymentStatus::from_str(&self.payment_status)?,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbGuideAvailability {
    pub id: Uuid,
    pub guide_id: Uuid,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

impl DbGuideAvailability {
    pub fn into_domain(self) -> GuideAvailability {
        GuideAvailability {
            id: self.id,
            guide_id: self.guide_id,
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProfile {
    pub user_id: Uuid,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl DbProfile {
    pub fn into_domain(self) -> Result<Profile> {
        Ok(Profile {
            user_id: self.user_id,
            name: self.name,
            role: Role::from_str(&self.role)?,
            created_at: self.created_at,
        })
    }
}
