use super::{Report, UPCOMING_DAYS};
use crate::core::interval::Interval;
use crate::core::models::{Booking, BookingDraft, Property};
use crate::core::repository::Repository;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn booking(id: i32, property_id: i32, check_in: &str, total: Option<i64>, paid: bool) -> Booking {
    let start = crate::core::types::Date::try_from_str(check_in).unwrap().0;
    let interval = Interval::new(start, start + Duration::days(2)).unwrap();
    let draft = BookingDraft::new("Guest", interval).with_amounts(total.map(Decimal::from), None);
    let mut b = Booking::new(property_id, draft);
    b.id = id;
    b.is_paid = paid;
    b
}

fn properties(names: &[&str]) -> Repository<Property> {
    let mut repo = Repository::new();
    for name in names {
        repo.insert(Property::new(1, *name).unwrap());
    }
    repo
}

#[test]
fn splits_paid_and_pending_revenue() {
    let bookings = [
        booking(1, 1, "2024-06-10", Some(300), true),
        booking(2, 1, "2024-07-01", Some(200), false),
        booking(3, 2, "2024-05-02", None, true),
    ];
    let refs: Vec<&Booking> = bookings.iter().collect();
    let report = Report::build(&refs, &properties(&["Cabin", "Loft"]), d(2024, 6, 1));

    assert_eq!(report.paid_revenue, Decimal::from(300));
    assert_eq!(report.pending_revenue, Decimal::from(200));
    assert_eq!(report.booking_count, 3);
    assert_eq!(report.paid_count, 2);
    assert_eq!(report.unpaid_count, 1);
}

#[test]
fn month_revenue_counts_paid_check_ins_of_current_month() {
    let bookings = [
        booking(1, 1, "2024-06-28", Some(100), true),
        booking(2, 1, "2024-06-03", Some(50), false),
        booking(3, 1, "2024-05-30", Some(400), true),
        booking(4, 1, "2023-06-15", Some(700), true),
    ];
    let refs: Vec<&Booking> = bookings.iter().collect();
    let report = Report::build(&refs, &properties(&["Cabin"]), d(2024, 6, 1));
    assert_eq!(report.month_revenue, Decimal::from(100));
}

#[test]
fn upcoming_window_includes_today_and_last_day() {
    let today = d(2024, 6, 1);
    let last = today + Duration::days(UPCOMING_DAYS);
    let bookings = [
        booking(1, 1, "2024-06-01", None, false),
        booking(2, 1, &last.format("%Y-%m-%d").to_string(), None, false),
        booking(3, 1, "2024-06-09", None, false),
        booking(4, 1, "2024-05-31", None, false),
    ];
    let refs: Vec<&Booking> = bookings.iter().collect();
    let report = Report::build(&refs, &properties(&["Cabin"]), today);
    assert_eq!(report.upcoming_check_ins, 2);
}

#[test]
fn property_stats_sorted_by_paid_revenue() {
    let bookings = [
        booking(1, 1, "2024-06-10", Some(100), true),
        booking(2, 2, "2024-06-10", Some(500), true),
        booking(3, 2, "2024-06-20", Some(900), false),
        booking(4, 3, "2024-06-10", Some(100), true),
    ];
    let refs: Vec<&Booking> = bookings.iter().collect();
    let report = Report::build(&refs, &properties(&["Cabin", "Loft", "Barn", "Shed"]), d(2024, 6, 1));

    let rows: Vec<_> = report
        .properties
        .iter()
        .map(|s| (s.name.as_str(), s.booking_count, s.revenue))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Loft", 2, Decimal::from(500)),
            ("Cabin", 1, Decimal::from(100)),
            ("Barn", 1, Decimal::from(100)),
            ("Shed", 0, Decimal::ZERO),
        ]
    );
}

#[test]
fn empty_ledger_reports_zeroes() {
    let report = Report::build(&[], &Repository::new(), d(2024, 6, 1));
    assert_eq!(report.paid_revenue, Decimal::ZERO);
    assert_eq!(report.booking_count, 0);
    assert!(report.properties.is_empty());
}
