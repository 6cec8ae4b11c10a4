// availability/mod.rs
#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::core::interval::Interval;
use crate::core::models::Booking;
use crate::core::types::PaletteColor;
use crate::errors::Error;

/// Outcome of checking candidate dates against a property's bookings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Availability<'a> {
    Available,
    Conflict { with_booking: &'a Booking },
}

impl<'a> Availability<'a> {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }

    pub fn conflict(&self) -> Option<&'a Booking> {
        match self {
            Availability::Available => None,
            Availability::Conflict { with_booking } => Some(*with_booking),
        }
    }

    /// User-facing explanation, `None` when available.
    pub fn message(&self) -> Option<String> {
        self.conflict().map(overlap_message)
    }

    /// Turns a conflict into `Error::BookingConflict`.
    pub fn into_result(self) -> crate::errors::Result<()> {
        match self {
            Availability::Available => Ok(()),
            Availability::Conflict { with_booking } => Err(Error::BookingConflict {
                booking_id: with_booking.id,
                message: overlap_message(with_booking),
            }),
        }
    }
}

pub fn overlap_message(booking: &Booking) -> String {
    format!(
        "Your selected dates overlap with a booking by {} ({}).",
        booking.customer_name, booking.interval
    )
}

pub fn date_taken_message(booking: &Booking) -> String {
    format!(
        "This date is already booked by {} ({}).",
        booking.customer_name, booking.interval
    )
}

/// Checks `candidate` against the bookings of `property_id`, skipping
/// `exclude` (the booking being edited). Both ends are inclusive, so a
/// check-out on the same day as another check-in conflicts. When several
/// bookings overlap, the one with the earliest check-in (then lowest id)
/// is reported.
pub fn check_availability<'a, I>(
    existing: I,
    property_id: i32,
    candidate: &Interval,
    exclude: Option<i32>,
) -> Availability<'a>
where
    I: IntoIterator<Item = &'a Booking>,
{
    existing
        .into_iter()
        .filter(|b| b.property_id == property_id)
        .filter(|b| Some(b.id) != exclude)
        .filter(|b| b.interval.overlaps(candidate))
        .min_by_key(|b| (b.check_in(), b.id))
        .map_or(Availability::Available, |with_booking| {
            Availability::Conflict { with_booking }
        })
}

/// The booking covering `date`, if any. Used when a calendar day is tapped.
pub fn booking_on<'a, I>(bookings: I, date: NaiveDate) -> Option<&'a Booking>
where
    I: IntoIterator<Item = &'a Booking>,
{
    bookings
        .into_iter()
        .filter(|b| b.interval.contains(date))
        .min_by_key(|b| (b.check_in(), b.id))
}

/// Calendar shading for `window`: each booked day maps to its booking's
/// color. Where bookings share a day the earliest check-in wins.
pub fn booked_dates<'a, I>(bookings: I, window: &Interval) -> BTreeMap<NaiveDate, PaletteColor>
where
    I: IntoIterator<Item = &'a Booking>,
{
    let mut ordered: Vec<&Booking> = bookings.into_iter().collect();
    ordered.sort_by_key(|b| (b.check_in(), b.id));

    let mut days = BTreeMap::new();
    for booking in ordered {
        let Some(span) = booking.interval.intersection(window) else {
            continue;
        };
        let color = booking.color();
        for day in span.days() {
            days.entry(day).or_insert(color);
        }
    }
    days
}
