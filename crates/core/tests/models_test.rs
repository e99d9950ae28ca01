use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, to_string};
use trailbook_core::models::{
    assignment::{AssignmentResult, AutoAssignResponse},
    availability::{CreateAvailabilityRequest, GuideAvailability},
    booking::{Booking, BookingStatus, CreateBookingRequest, PaymentStatus},
    hike::{CreateHikeRequest, Difficulty, Hike},
    profile::Role,
};
use uuid::Uuid;

#[test]
fn test_hike_serialization() {
    let hike = Hike {
        id: Uuid::new_v4(),
        name: "Sunrise Summit".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        duration: "4 hours".to_string(),
        difficulty: Difficulty::Moderate,
        price_cents: 6500,
        max_participants: 12,
        guide_id: None,
        created_at: Utc::now(),
    };

    let json = to_string(&hike).expect("Failed to serialize hike");
    let deserialized: Hike = from_str(&json).expect("Failed to deserialize hike");

    assert_eq!(deserialized.id, hike.id);
    assert_eq!(deserialized.name, hike.name);
    assert_eq!(deserialized.duration, hike.duration);
    assert_eq!(deserialized.difficulty, hike.difficulty);
    assert_eq!(deserialized.max_participants, hike.max_participants);
    assert_eq!(deserialized.guide_id, None);
}

#[test]
fn test_booking_serialization() {
    let booking = Booking {
        id: Uuid::new_v4(),
        hike_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        participants: 3,
        status: BookingStatus::Confirmed,
        payment_status: PaymentStatus::Paid,
        created_at: Utc::now(),
    };

    let json = to_string(&booking).expect("Failed to serialize booking");
    let deserialized: Booking = from_str(&json).expect("Failed to deserialize booking");

    assert_eq!(deserialized.id, booking.id);
    assert_eq!(deserialized.participants, booking.participants);
    assert_eq!(deserialized.status, booking.status);
    assert_eq!(deserialized.payment_status, booking.payment_status);
}

#[rstest]
#[case(BookingStatus::Pending, "pending")]
#[case(BookingStatus::Confirmed, "confirmed")]
#[case(BookingStatus::Cancelled, "cancelled")]
#[case(BookingStatus::Completed, "completed")]
fn test_booking_status_round_trip(#[case] status: BookingStatus, #[case] text: &str) {
    assert_eq!(status.to_string(), text);
    assert_eq!(BookingStatus::from_str(text).unwrap(), status);
}

#[rstest]
#[case(PaymentStatus::Unpaid, "unpaid")]
#[case(PaymentStatus::Paid, "paid")]
#[case(PaymentStatus::Refunded, "refunded")]
fn test_payment_status_round_trip(#[case] status: PaymentStatus, #[case] text: &str) {
    assert_eq!(status.to_string(), text);
    assert_eq!(PaymentStatus::from_str(text).unwrap(), status);
}

#[rstest]
#[case(Role::Admin, "admin")]
#[case(Role::Guide, "guide")]
#[case(Role::Hiker, "hiker")]
fn test_role_round_trip(#[case] role: Role, #[case] text: &str) {
    assert_eq!(role.to_string(), text);
    assert_eq!(Role::from_str(text).unwrap(), role);
}

#[test]
fn test_unknown_status_strings_are_rejected() {
    assert!(BookingStatus::from_str("paused").is_err());
    assert!(PaymentStatus::from_str("partial").is_err());
    assert!(Role::from_str("superuser").is_err());
    assert!(Difficulty::from_str("extreme").is_err());
}

#[rstest]
#[case(Difficulty::Easy, 1)]
#[case(Difficulty::Moderate, 2)]
#[case(Difficulty::Hard, 3)]
fn test_difficulty_occupied_hours(#[case] difficulty: Difficulty, #[case] hours: u32) {
    assert_eq!(difficulty.occupied_hours(), hours);
}

#[test]
fn test_cancelled_booking_does_not_count_against_capacity() {
    let mut booking = Booking {
        id: Uuid::new_v4(),
        hike_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        participants: 2,
        status: BookingStatus::Confirmed,
        payment_status: PaymentStatus::Paid,
        created_at: Utc::now(),
    };
    assert!(booking.counts_against_capacity());

    booking.status = BookingStatus::Cancelled;
    assert!(!booking.counts_against_capacity());
}

#[test]
fn test_create_booking_request_deserialization() {
    let json = format!(
        r#"{{"hike_id":"{}","user_id":"{}","date":"2024-06-15","time":"09:00 AM","participants":2}}"#,
        Uuid::new_v4(),
        Uuid::new_v4()
    );

    let request: CreateBookingRequest = from_str(&json).expect("Failed to deserialize request");
    assert_eq!(request.time, "09:00 AM");
    assert_eq!(request.participants, 2);
}

#[test]
fn test_create_hike_request_round_trip() {
    let request = CreateHikeRequest {
        name: "Lake Loop".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        duration: "90 min".to_string(),
        difficulty: Difficulty::Easy,
        price_cents: 3000,
        max_participants: 8,
    };

    let json = to_string(&request).expect("Failed to serialize request");
    let deserialized: CreateHikeRequest = from_str(&json).expect("Failed to deserialize request");

    assert_eq!(deserialized.name, request.name);
    assert_eq!(deserialized.duration, request.duration);
    assert_eq!(deserialized.difficulty, request.difficulty);
}

#[test]
fn test_availability_window_serialization() {
    let window = GuideAvailability {
        id: Uuid::new_v4(),
        guide_id: Uuid::new_v4(),
        day_of_week: 1,
        start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        created_at: Utc::now(),
    };

    let json = to_string(&window).expect("Failed to serialize window");
    let deserialized: GuideAvailability = from_str(&json).expect("Failed to deserialize window");

    assert_eq!(deserialized.guide_id, window.guide_id);
    assert_eq!(deserialized.day_of_week, 1);
    assert_eq!(deserialized.start_time, window.start_time);
    assert_eq!(deserialized.end_time, window.end_time);
}

#[test]
fn test_create_availability_request_deserialization() {
    let json = r#"{"day_of_week":3,"start_time":"08:00:00","end_time":"16:00:00"}"#;
    let request: CreateAvailabilityRequest = from_str(json).expect("Failed to deserialize request");

    assert_eq!(request.day_of_week, 3);
    assert_eq!(request.start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
}

#[test]
fn test_assignment_result_omits_empty_fields() {
    let assigned = AssignmentResult {
        hike_id: Uuid::new_v4(),
        hike_name: "Sunrise Summit".to_string(),
        assigned: true,
        guide_id: Some(Uuid::new_v4()),
        reason: None,
    };
    let json = to_string(&assigned).expect("Failed to serialize result");
    assert!(json.contains("guide_id"));
    assert!(!json.contains("reason"));

    let skipped = AssignmentResult {
        hike_id: Uuid::new_v4(),
        hike_name: "Lake Loop".to_string(),
        assigned: false,
        guide_id: None,
        reason: Some("No available guides".to_string()),
    };
    let json = to_string(&skipped).expect("Failed to serialize result");
    assert!(!json.contains("guide_id"));
    assert!(json.contains("No available guides"));
}

#[test]
fn test_auto_assign_response_round_trip() {
    let response = AutoAssignResponse {
        results: vec![AssignmentResult {
            hike_id: Uuid::new_v4(),
            hike_name: "Ridge Traverse".to_string(),
            assigned: false,
            guide_id: None,
            reason: Some("All guides already assigned".to_string()),
        }],
    };

    let json = to_string(&response).expect("Failed to serialize response");
    let deserialized: AutoAssignResponse = from_str(&json).expect("Failed to deserialize response");

    assert_eq!(deserialized.results.len(), 1);
    assert_eq!(deserialized.results[0].hike_name, "Ridge Traverse");
    assert!(!deserialized.results[0].assigned);
}
