pub mod total;

use crate::core::models::{Booking, Invoice, InvoiceAdjustment};
use crate::errors::{Result, require};
use chrono::NaiveDateTime;

/// `INV-` plus the last eight digits of the epoch-millisecond timestamp.
pub fn invoice_number(epoch_millis: i64) -> String {
    let digits = epoch_millis.unsigned_abs().to_string();
    let tail = &digits[digits.len().saturating_sub(8)..];
    format!("INV-{tail}")
}

/// Drafts an invoice for a booking's agreed total.
pub fn draft_for_booking(
    booking: &Booking,
    adjustments: Vec<InvoiceAdjustment>,
    epoch_millis: i64,
    created_at: NaiveDateTime,
) -> Result<Invoice> {
    let amount = require(
        booking.total_amount,
        format!("Booking {} has no total amount to invoice.", booking.id),
    )?;
    Ok(Invoice::new(
        booking.id,
        invoice_number(epoch_millis),
        amount,
        adjustments,
        created_at,
    ))
}
