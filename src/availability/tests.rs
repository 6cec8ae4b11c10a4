use super::*;
use crate::core::color::color_of;
use crate::core::models::BookingDraft;

fn booking(id: i32, property_id: i32, name: &str, check_in: &str, check_out: &str) -> Booking {
    let interval = Interval::try_from_strs(check_in, check_out).unwrap();
    let mut b = Booking::new(property_id, BookingDraft::new(name, interval));
    b.id = id;
    b
}

fn span(a: &str, b: &str) -> Interval {
    Interval::try_from_strs(a, b).unwrap()
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn same_day_handoff_conflicts() {
    let existing = vec![booking(1, 1, "Ana Ruiz", "2024-06-10", "2024-06-15")];
    let result = check_availability(&existing, 1, &span("2024-06-15", "2024-06-20"), None);
    assert_eq!(result.conflict().map(|b| b.id), Some(1));
    assert_eq!(
        result.message().unwrap(),
        "Your selected dates overlap with a booking by Ana Ruiz (6/10/2024 - 6/15/2024)."
    );
}

#[test]
fn day_after_check_out_is_available() {
    let existing = vec![booking(1, 1, "Ana Ruiz", "2024-06-10", "2024-06-15")];
    let result = check_availability(&existing, 1, &span("2024-06-16", "2024-06-20"), None);
    assert!(result.is_available());
    assert_eq!(result.message(), None);
}

#[test]
fn editing_booking_ignores_itself() {
    let existing = vec![booking(1, 1, "Ana Ruiz", "2024-06-10", "2024-06-15")];
    let candidate = span("2024-06-11", "2024-06-16");
    assert!(!check_availability(&existing, 1, &candidate, None).is_available());
    assert!(check_availability(&existing, 1, &candidate, Some(1)).is_available());
}

#[test]
fn other_properties_do_not_block() {
    let existing = vec![booking(1, 2, "Ana Ruiz", "2024-06-10", "2024-06-15")];
    assert!(check_availability(&existing, 1, &span("2024-06-10", "2024-06-15"), None).is_available());
}

#[test]
fn earliest_conflict_is_reported() {
    let existing = vec![
        booking(5, 1, "Late", "2024-06-18", "2024-06-19"),
        booking(9, 1, "Tie high id", "2024-06-12", "2024-06-13"),
        booking(3, 1, "Tie low id", "2024-06-12", "2024-06-14"),
    ];
    let result = check_availability(&existing, 1, &span("2024-06-01", "2024-06-30"), None);
    assert_eq!(result.conflict().map(|b| b.id), Some(3));
}

#[test]
fn conflict_converts_to_error() {
    let existing = vec![booking(4, 1, "Ana Ruiz", "2024-06-10", "2024-06-15")];
    let err = check_availability(&existing, 1, &span("2024-06-09", "2024-06-10"), None)
        .into_result()
        .unwrap_err();
    assert!(matches!(err, Error::BookingConflict { booking_id: 4, .. }));
    assert!(
        check_availability(&existing, 1, &span("2024-06-01", "2024-06-02"), None)
            .into_result()
            .is_ok()
    );
}

#[test]
fn booking_on_finds_covering_booking() {
    let existing = vec![
        booking(1, 1, "Ana Ruiz", "2024-06-10", "2024-06-15"),
        booking(2, 1, "Ben Cole", "2024-06-20", "2024-06-21"),
    ];
    assert_eq!(booking_on(&existing, day("2024-06-15")).map(|b| b.id), Some(1));
    assert_eq!(booking_on(&existing, day("2024-06-20")).map(|b| b.id), Some(2));
    assert!(booking_on(&existing, day("2024-06-17")).is_none());
    assert_eq!(
        date_taken_message(&existing[1]),
        "This date is already booked by Ben Cole (6/20/2024 - 6/21/2024)."
    );
}

#[test]
fn booked_dates_are_clipped_to_window() {
    let existing = vec![
        booking(1, 1, "Ana Ruiz", "2024-05-30", "2024-06-02"),
        booking(2, 1, "Ben Cole", "2024-06-29", "2024-07-03"),
    ];
    let days = booked_dates(&existing, &span("2024-06-01", "2024-06-30"));
    let keys: Vec<String> = days.keys().map(|d| d.format("%m-%d").to_string()).collect();
    assert_eq!(keys, vec!["06-01", "06-02", "06-29", "06-30"]);
    assert_eq!(days[&day("2024-06-01")], color_of("Ana Ruiz"));
    assert_eq!(days[&day("2024-06-30")], color_of("Ben Cole"));
}

#[test]
fn shared_day_takes_earliest_booking_color() {
    let existing = vec![
        booking(2, 1, "Ben Cole", "2024-06-15", "2024-06-18"),
        booking(1, 1, "Ana Ruiz", "2024-06-10", "2024-06-15"),
    ];
    let days = booked_dates(&existing, &span("2024-06-01", "2024-06-30"));
    assert_eq!(days.len(), 9);
    assert_eq!(days[&day("2024-06-15")], color_of("Ana Ruiz"));
    assert_eq!(days[&day("2024-06-16")], color_of("Ben Cole"));
}
