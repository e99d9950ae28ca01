//! Guide assignment conflict detection.
//!
//! Two hikes conflict for a guide when their occupied hour intervals
//! overlap on the same date. The interval length comes from the
//! difficulty heuristic (easy=1h, moderate=2h, hard=3h), not from the
//! free-text duration. Intervals are compared as closed ranges, so a
//! hike ending at 10:00 conflicts with one starting at 10:00; a guide
//! cannot be in two places at the handover minute.

use chrono::{NaiveTime, Timelike};

use crate::models::hike::{Difficulty, Hike};

/// Occupied hours on a hike's date, endpoints inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourInterval {
    pub start: u32,
    pub end: u32,
}

impl HourInterval {
    pub fn overlaps(&self, other: &HourInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

pub fn occupied_interval(time: NaiveTime, difficulty: Difficulty) -> HourInterval {
    let start = time.hour();
    HourInterval {
        start,
        end: start + difficulty.occupied_hours(),
    }
}

/// Whether assigning a guide holding `existing` would clash with
/// `candidate`. Hikes on different dates never conflict.
pub fn conflicts_with(candidate: &Hike, existing: &Hike) -> bool {
    if candidate.id == existing.id || candidate.date != existing.date {
        return false;
    }

    occupied_interval(candidate.time, candidate.difficulty)
        .overlaps(&occupied_interval(existing.time, existing.difficulty))
}
