//! Guide selection for unassigned hikes.
//!
//! Given the availability windows covering a hike's day-of-week, the set
//! of verified guide ids, and the hikes already assigned to guides, pick
//! the first candidate that survives the filter chain. First-match
//! selection is deterministic by design; there is no load balancing.

use std::collections::HashSet;
use std::fmt;

use chrono::{Datelike, NaiveDate, Timelike};
use uuid::Uuid;

use super::conflict;
use crate::models::availability::GuideAvailability;
use crate::models::hike::Hike;

/// Why no guide could be assigned to a hike. Each filtering stage that
/// empties the candidate list reports its own reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No availability window covers the hike's day and start hour.
    NoAvailableGuides,
    /// Windows exist, but none belongs to a user with the guide role.
    NoVerifiedGuides,
    /// Every verified candidate has a conflicting assignment.
    AllGuidesBusy,
    /// The assignment write failed; the batch carries on.
    DatabaseError,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::NoAvailableGuides => "No available guides",
            SkipReason::NoVerifiedGuides => "No verified guides",
            SkipReason::AllGuidesBusy => "All guides already assigned",
            SkipReason::DatabaseError => "Database error",
        };
        write!(f, "{}", s)
    }
}

/// Day-of-week index for a date, 0 = Sunday .. 6 = Saturday, matching
/// `GuideAvailability::day_of_week`.
pub fn day_of_week(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

/// Whether a window covers a start hour. Hour-level comparison only:
/// minutes on both sides are deliberately ignored.
pub fn window_covers(window: &GuideAvailability, hour: u32) -> bool {
    window.start_time.hour() <= hour && hour <= window.end_time.hour()
}

/// Selects a guide for `hike`.
///
/// `windows` must already be filtered to the hike's day-of-week (the db
/// query does that); `verified` is the set of user ids confirmed to hold
/// the guide role; `assigned_hikes` are hikes that already have a guide.
///
/// Candidate order follows window order, so with fixed input data two
/// runs select identically.
pub fn select_guide(
    hike: &Hike,
    windows: &[GuideAvailability],
    verified: &HashSet<Uuid>,
    assigned_hikes: &[Hike],
) -> Result<Uuid, SkipReason> {
    let hour = hike.time.hour();

    // First-seen order, one entry per guide.
    let mut candidates: Vec<Uuid> = Vec::new();
    for window in windows.iter().filter(|w| window_covers(w, hour)) {
        if !candidates.contains(&window.guide_id) {
            candidates.push(window.guide_id);
        }
    }

    if candidates.is_empty() {
        return Err(SkipReason::NoAvailableGuides);
    }

    // Availability rows can outlive a role change; verify against the
    // profiles lookup.
    candidates.retain(|g| verified.contains(g));
    if candidates.is_empty() {
        return Err(SkipReason::NoVerifiedGuides);
    }

    for guide_id in candidates {
        let busy = assigned_hikes.iter().any(|existing| {
            existing.guide_id == Some(guide_id) && conflict::conflicts_with(hike, existing)
        });
        if !busy {
            return Ok(guide_id);
        }
    }

    Err(SkipReason::AllGuidesBusy)
}
