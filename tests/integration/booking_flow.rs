use rust_decimal::Decimal;
use stayledger::core::interval::Interval;
use stayledger::core::models::InvoiceAdjustment;
use stayledger::core::types::{AdjustmentKind, InvoiceStatus};
use stayledger::errors::Error;

use crate::common::{
    at, build_context, desk_at, draft, make_temp_dir, read_log_contents, write_valid_config,
};

#[test]
fn full_stay_from_booking_to_invoice() {
    let dir = make_temp_dir("stayledger-flow");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);
    let mut desk = desk_at(&mut ctx, at(2024, 6, 1, 9, 0));

    let cabin = desk.add_property(7, "Sea Cabin").unwrap();
    let booking = desk
        .create_booking(
            cabin,
            draft("Ana Ruiz", "2024-06-10", "2024-06-15")
                .with_amounts(Some(Decimal::from(500)), Some(Decimal::from(200))),
        )
        .unwrap();

    let err = desk
        .create_booking(cabin, draft("Ben Cole", "2024-06-15", "2024-06-18"))
        .unwrap_err();
    assert!(matches!(err, Error::BookingConflict { booking_id, .. } if booking_id == booking));

    let task = desk.housekeeping().for_property(cabin)[0].id;
    desk.housekeeping()
        .mark_clean(task, 12, at(2024, 6, 15, 13, 0))
        .unwrap();
    desk.housekeeping().verify(task).unwrap();
    assert!(desk.housekeeping().pending().is_empty());

    let cleaning =
        InvoiceAdjustment::new("Cleaning", Decimal::from(40), AdjustmentKind::Add).unwrap();
    let invoice = desk.issue_invoice(booking, vec![cleaning.clone()]).unwrap();
    assert_eq!(
        desk.context().invoices.get(invoice).unwrap().total(),
        Decimal::from(540)
    );
    assert_eq!(
        desk.balance_due(booking, &[cleaning]).unwrap(),
        Decimal::from(340)
    );
    desk.set_invoice_status(invoice, InvoiceStatus::Paid).unwrap();

    desk.delete_booking(booking).unwrap();
    assert!(desk.context().reminders.is_empty());
    assert!(desk.context().housekeeping.is_empty());
    assert!(
        desk.create_booking(cabin, draft("Ben Cole", "2024-06-15", "2024-06-18"))
            .is_ok()
    );

    let log = read_log_contents(&dir).expect("log file should exist");
    assert!(log.contains("Property with id 1 added ('Sea Cabin')"));
    assert!(log.contains(&format!("Booking with id {booking} deleted")));
}

#[test]
fn calendar_shades_each_booked_day() {
    let dir = make_temp_dir("stayledger-calendar");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);
    let mut desk = desk_at(&mut ctx, at(2024, 6, 1, 9, 0));
    let cabin = desk.add_property(7, "Sea Cabin").unwrap();
    desk.create_booking(cabin, draft("Ana Ruiz", "2024-06-10", "2024-06-15"))
        .unwrap();
    desk.create_booking(cabin, draft("Ben Cole", "2024-06-20", "2024-06-21"))
        .unwrap();

    let june = Interval::try_from_strs("2024-06-01", "2024-06-30").unwrap();
    let days = desk.calendar(cabin, &june);
    assert_eq!(days.len(), 8);

    let booking = desk
        .booking_on(cabin, june.start() + chrono::Duration::days(19))
        .unwrap();
    assert_eq!(booking.customer_name, "Ben Cole");
}

#[test]
fn missing_config_fails_context_build() {
    let dir = make_temp_dir("stayledger-missing");
    let err = stayledger::core::context::AppContext::new_with_paths(
        dir.join("config.json"),
        dir.join("logs"),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
