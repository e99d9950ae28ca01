pub mod assignment;
pub mod availability;
pub mod booking;
pub mod hike;
pub mod profile;
