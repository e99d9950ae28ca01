use chrono::{NaiveDate, NaiveTime, Utc};
use pretty_assertions::assert_eq;
use trailbook_core::models::booking::{Booking, BookingStatus, PaymentStatus};
use trailbook_core::scheduling::capacity::{
    available_slots, has_confirmed_booking, is_date_fully_booked, remaining_capacity,
};
use trailbook_core::scheduling::slots::map_slots;
use uuid::Uuid;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn t(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

fn booking(hour: u32, participants: i32, status: BookingStatus) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        hike_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        date: date(),
        time: t(hour),
        participants,
        status,
        payment_status: PaymentStatus::Paid,
        created_at: Utc::now(),
    }
}

#[test]
fn test_remaining_capacity_subtracts_confirmed_bookings() {
    // Capacity 10, 7 participants already confirmed at 09:00.
    let bookings = vec![
        booking(9, 4, BookingStatus::Confirmed),
        booking(9, 3, BookingStatus::Confirmed),
    ];

    assert_eq!(remaining_capacity(10, &bookings, date(), t(9)), 3);
    // Untouched slot keeps full capacity.
    assert_eq!(remaining_capacity(10, &bookings, date(), t(10)), 10);
}

#[test]
fn test_remaining_capacity_reaches_zero_after_fill() {
    let mut bookings = vec![
        booking(9, 4, BookingStatus::Confirmed),
        booking(9, 3, BookingStatus::Confirmed),
    ];
    bookings.push(booking(9, 3, BookingStatus::Confirmed));

    assert_eq!(remaining_capacity(10, &bookings, date(), t(9)), 0);
}

#[test]
fn test_remaining_capacity_never_negative() {
    // Over-subscribed slot is a data defect; report zero, not negative.
    let bookings = vec![booking(9, 15, BookingStatus::Confirmed)];
    assert_eq!(remaining_capacity(10, &bookings, date(), t(9)), 0);
}

#[test]
fn test_cancelled_bookings_do_not_count() {
    let bookings = vec![
        booking(9, 6, BookingStatus::Cancelled),
        booking(9, 2, BookingStatus::Confirmed),
    ];
    assert_eq!(remaining_capacity(10, &bookings, date(), t(9)), 8);
}

#[test]
fn test_pending_and_completed_count_against_capacity() {
    let bookings = vec![
        booking(9, 2, BookingStatus::Pending),
        booking(9, 3, BookingStatus::Completed),
    ];
    assert_eq!(remaining_capacity(10, &bookings, date(), t(9)), 5);
}

#[test]
fn test_remaining_capacity_is_idempotent() {
    let bookings = vec![booking(9, 4, BookingStatus::Confirmed)];
    let first = remaining_capacity(10, &bookings, date(), t(9));
    let second = remaining_capacity(10, &bookings, date(), t(9));
    assert_eq!(first, second);
}

#[test]
fn test_available_slots_drops_full_slots() {
    let bookings = vec![
        booking(9, 10, BookingStatus::Confirmed),
        booking(10, 4, BookingStatus::Confirmed),
    ];

    let open = available_slots("2 hours", 10, &bookings, date());
    assert_eq!(open.len(), 8);
    assert!(!open.contains(&t(9)));
    assert!(open.contains(&t(10)));
}

#[test]
fn test_slot_participants_plus_remaining_equals_capacity() {
    let bookings = vec![
        booking(8, 3, BookingStatus::Confirmed),
        booking(9, 10, BookingStatus::Confirmed),
        booking(10, 6, BookingStatus::Cancelled),
    ];

    for slot in map_slots("2 hours") {
        let counted: i32 = bookings
            .iter()
            .filter(|b| b.time == slot && b.status != BookingStatus::Cancelled)
            .map(|b| b.participants)
            .sum();
        let remaining = remaining_capacity(10, &bookings, date(), slot) as i32;
        assert_eq!(counted + remaining, 10);
    }
}

#[test]
fn test_date_fully_booked_when_every_slot_is_full() {
    // Long band has three slots: 08:00, 09:00, 10:00.
    let bookings = vec![
        booking(8, 5, BookingStatus::Confirmed),
        booking(9, 5, BookingStatus::Confirmed),
        booking(10, 5, BookingStatus::Confirmed),
    ];

    assert!(is_date_fully_booked("8 hours", 5, &bookings, date()));
}

#[test]
fn test_date_not_fully_booked_with_open_slot() {
    let bookings = vec![
        booking(8, 5, BookingStatus::Confirmed),
        booking(9, 4, BookingStatus::Confirmed),
        booking(10, 5, BookingStatus::Confirmed),
    ];

    assert!(!is_date_fully_booked("8 hours", 5, &bookings, date()));
}

#[test]
fn test_partial_data_does_not_look_fully_booked() {
    // Only two of the three long-band slots have any bookings. Even if
    // both are full, the distinct-slot guard keeps the date open.
    let bookings = vec![
        booking(8, 5, BookingStatus::Confirmed),
        booking(9, 5, BookingStatus::Confirmed),
    ];

    assert!(!is_date_fully_booked("8 hours", 5, &bookings, date()));
}

#[test]
fn test_double_booking_detection() {
    let user_id = Uuid::new_v4();
    let mut mine = booking(9, 2, BookingStatus::Confirmed);
    mine.user_id = user_id;
    let bookings = vec![mine, booking(9, 2, BookingStatus::Confirmed)];

    assert!(has_confirmed_booking(&bookings, user_id, date(), t(9)));
    // Different slot, different user, or cancelled: no duplicate.
    assert!(!has_confirmed_booking(&bookings, user_id, date(), t(10)));
    assert!(!has_confirmed_booking(
        &bookings,
        Uuid::new_v4(),
        date(),
        t(9)
    ));
}

#[test]
fn test_cancelled_booking_allows_rebooking() {
    let user_id = Uuid::new_v4();
    let mut mine = booking(9, 2, BookingStatus::Cancelled);
    mine.user_id = user_id;
    let bookings = vec![mine];

    assert!(!has_confirmed_booking(&bookings, user_id, date(), t(9)));
}
