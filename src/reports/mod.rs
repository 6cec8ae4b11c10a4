#[cfg(test)]
mod tests;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::core::models::{Booking, Property};
use crate::core::repository::{Repository, Sort};

/// Days ahead of today counted as upcoming check-ins, today included.
pub const UPCOMING_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyStats {
    pub property_id: i32,
    pub name: String,
    pub booking_count: usize,
    /// Paid revenue only.
    pub revenue: Decimal,
}

/// Revenue and occupancy figures for one owner, derived from bookings.
/// Bookings without a total count as zero revenue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub paid_revenue: Decimal,
    pub pending_revenue: Decimal,
    pub booking_count: usize,
    pub paid_count: usize,
    pub unpaid_count: usize,
    /// Paid revenue of bookings checking in during `today`'s month.
    pub month_revenue: Decimal,
    pub upcoming_check_ins: usize,
    /// Highest revenue first; ties keep property id order.
    pub properties: Vec<PropertyStats>,
}

impl Report {
    pub fn build(bookings: &[&Booking], properties: &Repository<Property>, today: NaiveDate) -> Self {
        let (paid, unpaid): (Vec<&Booking>, Vec<&Booking>) =
            bookings.iter().copied().partition(|b| b.is_paid);

        let in_month = |b: &&Booking| {
            let check_in = b.check_in();
            check_in.year() == today.year() && check_in.month() == today.month()
        };
        let horizon = today + Duration::days(UPCOMING_DAYS);

        let mut stats: Vec<PropertyStats> = properties
            .values(Sort::IdAsc)
            .into_iter()
            .map(|property| {
                let own: Vec<&Booking> = bookings
                    .iter()
                    .copied()
                    .filter(|b| b.property_id == property.id)
                    .collect();
                PropertyStats {
                    property_id: property.id,
                    name: property.name.clone(),
                    booking_count: own.len(),
                    revenue: revenue_of(own.iter().copied().filter(|b| b.is_paid)),
                }
            })
            .collect();
        stats.sort_by(|a, b| b.revenue.cmp(&a.revenue));

        Self {
            paid_revenue: revenue_of(paid.iter().copied()),
            pending_revenue: revenue_of(unpaid.iter().copied()),
            booking_count: bookings.len(),
            paid_count: paid.len(),
            unpaid_count: unpaid.len(),
            month_revenue: revenue_of(paid.iter().copied().filter(in_month)),
            upcoming_check_ins: bookings
                .iter()
                .filter(|b| b.check_in() >= today && b.check_in() <= horizon)
                .count(),
            properties: stats,
        }
    }
}

fn revenue_of<'a>(bookings: impl Iterator<Item = &'a Booking>) -> Decimal {
    bookings
        .filter_map(|b| b.total_amount)
        .fold(Decimal::ZERO, |acc, amount| {
            acc.checked_add(amount).unwrap_or(Decimal::MAX)
        })
}
