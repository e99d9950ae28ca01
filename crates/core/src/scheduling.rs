//! # Scheduling Core
//!
//! The domain rules behind the booking flow:
//!
//! - [`slots`] maps a hike's free-text duration onto its fixed list of
//!   bookable start times.
//! - [`capacity`] computes remaining capacity per (date, slot) from
//!   existing bookings and flags fully booked dates.
//! - [`conflict`] detects overlapping guide assignments using the
//!   difficulty-based duration heuristic.
//! - [`assign`] selects a guide for an unassigned hike from availability
//!   windows, verified roles, and existing assignments.
//!
//! All functions are pure: callers fetch the rows, this module computes.

pub mod assign;
pub mod capacity;
pub mod conflict;
pub mod slots;
