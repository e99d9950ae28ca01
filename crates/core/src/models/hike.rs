use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TrailError;

/// Difficulty rating of a hike. Also drives the coarse duration heuristic
/// used for guide conflict detection (see `scheduling::conflict`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    /// Hours a hike of this difficulty is assumed to occupy a guide.
    /// Intentionally approximate: the free-text duration is ignored here.
    pub fn occupied_hours(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Moderate => 2,
            Difficulty::Hard => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Difficulty {
    type Err = TrailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "moderate" => Ok(Difficulty::Moderate),
            "hard" => Ok(Difficulty::Hard),
            other => Err(TrailError::Validation(format!(
                "Unknown difficulty: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hike {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Free-text duration, e.g. "2 hours" or "90 min". Parsed at runtime
    /// by the slot mapper.
    pub duration: String,
    pub difficulty: Difficulty,
    pub price_cents: i64,
    /// Maximum participants per time slot.
    pub max_participants: i32,
    pub guide_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHikeRequest {
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: String,
    pub difficulty: Difficulty,
    pub price_cents: i64,
    pub max_participants: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HikeResponse {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: String,
    pub difficulty: Difficulty,
    pub price_cents: i64,
    pub max_participants: i32,
    pub guide_id: Option<Uuid>,
}

/// Bookable slots for a hike on a given date, as shown to the hiker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotAvailabilityResponse {
    pub hike_id: Uuid,
    pub date: NaiveDate,
    /// Slot labels in "08:00 AM" form with remaining capacity > 0.
    pub slots: Vec<String>,
    pub fully_booked: bool,
}
