//! Capacity aggregation.
//!
//! Pure read-and-compute over a hike's booking rows. Callers fetch the
//! bookings for a hike (the db layer owns the queries); these functions
//! derive remaining capacity per slot, the subset of slots still open on
//! a date, and whether a date is fully booked. Cancelled bookings never
//! count against capacity.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use super::slots;
use crate::models::booking::{Booking, BookingStatus};

/// Remaining capacity for one (date, slot) pair. Never negative: an
/// over-subscribed slot (a data defect) reports zero rather than a
/// negative count. Callers must reject requests that exceed the returned
/// value, not clamp them.
pub fn remaining_capacity(
    max_per_slot: i32,
    bookings: &[Booking],
    date: NaiveDate,
    time: NaiveTime,
) -> u32 {
    let booked: i64 = bookings
        .iter()
        .filter(|b| b.date == date && b.time == time && b.counts_against_capacity())
        .map(|b| i64::from(b.participants))
        .sum();

    (i64::from(max_per_slot) - booked).max(0) as u32
}

/// Slots from the duration mapper that still have capacity on `date`.
pub fn available_slots(
    duration: &str,
    max_per_slot: i32,
    bookings: &[Booking],
    date: NaiveDate,
) -> Vec<NaiveTime> {
    slots::map_slots(duration)
        .into_iter()
        .filter(|t| remaining_capacity(max_per_slot, bookings, date, *t) > 0)
        .collect()
}

/// True only when every mapped slot has zero remaining capacity AND the
/// number of distinct booked slots equals the mapped slot count. The
/// second condition guards against a date looking "full" off partial
/// data (e.g. bookings recorded at times outside the mapped slot list).
pub fn is_date_fully_booked(
    duration: &str,
    max_per_slot: i32,
    bookings: &[Booking],
    date: NaiveDate,
) -> bool {
    let mapped = slots::map_slots(duration);

    let mut booked_times: Vec<NaiveTime> = bookings
        .iter()
        .filter(|b| b.date == date && b.counts_against_capacity())
        .map(|b| b.time)
        .collect();
    booked_times.sort();
    booked_times.dedup();

    booked_times.len() == mapped.len()
        && mapped
            .iter()
            .all(|t| remaining_capacity(max_per_slot, bookings, date, *t) == 0)
}

/// Whether `user_id` already holds a confirmed booking for this exact
/// (date, slot). Reference semantics for the duplicate guard that
/// `create_booking` runs in SQL inside its transaction; the tests here
/// pin the rule (confirmed only, exact slot match) that the query must
/// mirror.
pub fn has_confirmed_booking(
    bookings: &[Booking],
    user_id: Uuid,
    date: NaiveDate,
    time: NaiveTime,
) -> bool {
    bookings.iter().any(|b| {
        b.user_id == user_id
            && b.date == date
            && b.time == time
            && b.status == BookingStatus::Confirmed
    })
}
