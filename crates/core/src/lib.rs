//! # Trailbook Core
//!
//! Domain models, error types, and the scheduling core for the Trailbook
//! guided-hiking booking service. Everything here is pure computation:
//! no I/O, no database access. The `scheduling` module holds the three
//! cooperating pieces the booking flow is built on: the duration to slot
//! mapper, the capacity aggregator, and guide conflict detection /
//! selection for auto-assignment.

pub mod errors;
pub mod models;
pub mod scheduling;
