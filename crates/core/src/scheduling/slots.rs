//! Duration → slot mapping.
//!
//! A hike's duration is stored as free text ("2 hours", "90 min"). The
//! mapper parses it, classifies it into one of three bands, and returns
//! the band's fixed list of bookable start times:
//!
//! - short (< 3h): hourly 08:00–16:00, 9 slots
//! - medium (3–6h inclusive): 08:00–13:00, 6 slots
//! - long (> 6h): 08:00–10:00, 3 slots
//!
//! Shorter hikes can start later in the day, so they get more slots.

use chrono::NaiveTime;

/// Display format for slot labels, e.g. "08:00 AM".
pub const SLOT_FORMAT: &str = "%I:%M %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBand {
    Short,
    Medium,
    Long,
}

impl DurationBand {
    pub fn classify(hours: f64) -> Self {
        if hours < 3.0 {
            DurationBand::Short
        } else if hours <= 6.0 {
            DurationBand::Medium
        } else {
            DurationBand::Long
        }
    }

    /// Last slot hour for this band; slots run hourly from 08:00.
    fn last_slot_hour(&self) -> u32 {
        match self {
            DurationBand::Short => 16,
            DurationBand::Medium => 13,
            DurationBand::Long => 10,
        }
    }

    pub fn slot_times(&self) -> Vec<NaiveTime> {
        (8..=self.last_slot_hour())
            .map(|h| NaiveTime::from_hms_opt(h, 0, 0).unwrap())
            .collect()
    }
}

/// Parses a numeric hour value out of a free-text duration.
///
/// "min" anywhere in the text means the number is minutes and is
/// normalized to hours. A missing numeric token, or a zero/negative
/// value, falls back to 1 hour.
pub fn parse_duration_hours(text: &str) -> f64 {
    let lower = text.to_lowercase();

    let Some(value) = first_number(&lower) else {
        return 1.0;
    };

    let hours = if lower.contains("min") {
        value / 60.0
    } else {
        value
    };

    if hours <= 0.0 { 1.0 } else { hours }
}

/// First numeric token in the string, allowing a decimal point.
fn first_number(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// The canonical slot list for a duration: ordered ascending, no
/// duplicates, never empty.
pub fn map_slots(duration: &str) -> Vec<NaiveTime> {
    DurationBand::classify(parse_duration_hours(duration)).slot_times()
}

/// Renders a slot as its display label, e.g. "08:00 AM".
pub fn format_slot(time: NaiveTime) -> String {
    time.format(SLOT_FORMAT).to_string()
}

/// Parses a slot label back into a time of day.
pub fn parse_slot(label: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(label.trim(), SLOT_FORMAT).ok()
}
