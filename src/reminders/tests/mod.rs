
use crate::core::interval::Interval;
use crate::core::models::{Booking, BookingDraft};
use crate::core::types::ClockTime;
use chrono::{NaiveDate, NaiveDateTime};

pub(super) fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub(super) fn sample_booking(id: i32, check_in: &str, check_out: &str) -> Booking {
    let interval = Interval::try_from_strs(check_in, check_out).unwrap();
    let mut booking = Booking::new(1, BookingDraft::new("Ana Ruiz", interval));
    booking.id = id;
    booking
}

pub(super) fn timed_booking(id: i32, check_in_time: &str, check_out_time: &str) -> Booking {
    let mut booking = sample_booking(id, "2024-06-10", "2024-06-15");
    booking.check_in_time = Some(ClockTime::try_from_str(check_in_time).unwrap());
    booking.check_out_time = Some(ClockTime::try_from_str(check_out_time).unwrap());
    booking
}
