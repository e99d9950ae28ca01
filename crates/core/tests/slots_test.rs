use chrono::NaiveTime;
use pretty_assertions::assert_eq;
use rstest::rstest;
use trailbook_core::scheduling::slots::{
    format_slot, map_slots, parse_duration_hours, parse_slot, DurationBand,
};

fn t(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

#[rstest]
#[case("2 hours", 2.0)]
#[case("2.5 hours", 2.5)]
#[case("90 min", 1.5)]
#[case("45 minutes", 0.75)]
#[case("Approximately 4 hours", 4.0)]
fn test_parse_duration_hours(#[case] text: &str, #[case] expected: f64) {
    assert_eq!(parse_duration_hours(text), expected);
}

#[rstest]
#[case("")]
#[case("a while")]
#[case("all day, probably")]
#[case("0 hours")]
#[case("0 min")]
fn test_parse_duration_defaults_to_one_hour(#[case] text: &str) {
    assert_eq!(parse_duration_hours(text), 1.0);
}

#[rstest]
#[case(0.5, DurationBand::Short)]
#[case(2.9, DurationBand::Short)]
#[case(3.0, DurationBand::Medium)]
#[case(4.5, DurationBand::Medium)]
#[case(6.0, DurationBand::Medium)]
#[case(6.1, DurationBand::Long)]
#[case(12.0, DurationBand::Long)]
fn test_band_classification(#[case] hours: f64, #[case] expected: DurationBand) {
    assert_eq!(DurationBand::classify(hours), expected);
}

#[test]
fn test_short_band_slots() {
    // Under 3 hours: hourly from 08:00 through 04:00 PM.
    let slots = map_slots("2 hours");
    assert_eq!(slots.len(), 9);
    assert_eq!(slots.first(), Some(&t(8)));
    assert_eq!(slots.last(), Some(&t(16)));
}

#[test]
fn test_medium_band_slots() {
    let slots = map_slots("4 hours");
    let labels: Vec<String> = slots.into_iter().map(format_slot).collect();
    assert_eq!(
        labels,
        vec![
            "08:00 AM", "09:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "01:00 PM",
        ]
    );
}

#[test]
fn test_long_band_slots() {
    let slots = map_slots("8 hours");
    assert_eq!(slots, vec![t(8), t(9), t(10)]);
}

#[test]
fn test_unparseable_duration_gets_short_band() {
    // Defaults to 1 hour, which is short.
    assert_eq!(map_slots("unknown").len(), 9);
    assert_eq!(map_slots("").len(), 9);
}

#[rstest]
#[case("30 min")]
#[case("2 hours")]
#[case("3 hours")]
#[case("6 hours")]
#[case("10 hours")]
#[case("nonsense")]
fn test_slots_are_ordered_and_unique(#[case] duration: &str) {
    let slots = map_slots(duration);
    assert!(!slots.is_empty());
    for pair in slots.windows(2) {
        assert!(pair[0] < pair[1], "slots must ascend strictly");
    }
}

#[test]
fn test_slot_label_round_trip() {
    assert_eq!(format_slot(t(8)), "08:00 AM");
    assert_eq!(format_slot(t(13)), "01:00 PM");
    assert_eq!(parse_slot("08:00 AM"), Some(t(8)));
    assert_eq!(parse_slot(" 01:00 PM "), Some(t(13)));
    assert_eq!(parse_slot("25:00 AM"), None);
    assert_eq!(parse_slot("morning"), None);
}
