use crate::core::color::color_of;
use crate::core::interval::Interval;
use crate::core::types::{AdjustmentKind, ClockTime, InvoiceStatus, PaletteColor, ReminderKind};
use crate::errors::{Error, Result};
use crate::invoice::total::compute_total;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub trait BaseEntity {
    /// Name used in not-found errors.
    const ENTITY: &'static str;

    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
}

// =========
// Property
// =========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub photo_url: Option<String>,
}
impl Property {
    pub fn new(owner_id: i32, name: impl Into<String>) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::validation("Property name is required."));
        }
        Ok(Self {
            id: 0,
            owner_id,
            name,
            photo_url: None,
        })
    }
}
impl BaseEntity for Property {
    const ENTITY: &'static str = "Property";
    fn id(&self) -> i32 {
        self.id
    }
    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

// ========
// Booking
// ========

/// Caller-supplied booking fields, validated before they reach the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub interval: Interval,
    #[serde(default)]
    pub check_in_time: Option<ClockTime>,
    #[serde(default)]
    pub check_out_time: Option<ClockTime>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub advance_payment: Option<Decimal>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BookingDraft {
    pub fn new(customer_name: impl Into<String>, interval: Interval) -> Self {
        Self {
            customer_name: customer_name.into(),
            customer_email: None,
            customer_phone: None,
            interval,
            check_in_time: None,
            check_out_time: None,
            total_amount: None,
            advance_payment: None,
            is_paid: false,
            notes: None,
        }
    }

    pub fn with_times(mut self, check_in: Option<ClockTime>, check_out: Option<ClockTime>) -> Self {
        self.check_in_time = check_in;
        self.check_out_time = check_out;
        self
    }

    pub fn with_amounts(mut self, total: Option<Decimal>, advance: Option<Decimal>) -> Self {
        self.total_amount = total;
        self.advance_payment = advance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.customer_name.trim().is_empty() {
            return Err(Error::validation("Customer name is required."));
        }
        if let Some(total) = self.total_amount {
            if total <= Decimal::ZERO {
                return Err(Error::validation("Total amount must be greater than zero."));
            }
        }
        if let Some(advance) = self.advance_payment {
            if advance <= Decimal::ZERO {
                return Err(Error::validation(
                    "Advance payment must be greater than zero.",
                ));
            }
            match self.total_amount {
                Some(total) if advance > total => {
                    return Err(Error::validation(
                        "Advance payment cannot be greater than the total amount.",
                    ));
                }
                None => {
                    return Err(Error::validation(
                        "Advance payment requires a total amount.",
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i32,
    pub property_id: i32,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub interval: Interval,
    pub check_in_time: Option<ClockTime>,
    pub check_out_time: Option<ClockTime>,
    pub total_amount: Option<Decimal>,
    pub advance_payment: Option<Decimal>,
    pub is_paid: bool,
    pub notes: Option<String>,
}

impl Booking {
    pub fn new(property_id: i32, draft: BookingDraft) -> Self {
        let mut booking = Self {
            id: 0,
            property_id,
            customer_name: String::new(),
            customer_email: None,
            customer_phone: None,
            interval: draft.interval,
            check_in_time: None,
            check_out_time: None,
            total_amount: None,
            advance_payment: None,
            is_paid: false,
            notes: None,
        };
        booking.modify(draft);
        booking
    }

    pub fn modify(&mut self, draft: BookingDraft) -> &Self {
        self.customer_name = draft.customer_name.trim().to_string();
        self.customer_email = trimmed(draft.customer_email).map(|e| e.to_lowercase());
        self.customer_phone = trimmed(draft.customer_phone);
        self.interval = draft.interval;
        self.check_in_time = draft.check_in_time;
        self.check_out_time = draft.check_out_time;
        self.total_amount = draft.total_amount;
        self.advance_payment = draft.advance_payment;
        self.is_paid = draft.is_paid;
        self.notes = trimmed(draft.notes);
        self
    }

    pub fn check_in(&self) -> NaiveDate {
        self.interval.start()
    }

    pub fn check_out(&self) -> NaiveDate {
        self.interval.end()
    }

    pub fn color(&self) -> PaletteColor {
        color_of(&self.customer_name)
    }

    pub fn date_for(&self, kind: ReminderKind) -> NaiveDate {
        match kind {
            ReminderKind::CheckIn => self.check_in(),
            ReminderKind::CheckOut => self.check_out(),
        }
    }

    pub fn time_for(&self, kind: ReminderKind) -> Option<ClockTime> {
        match kind {
            ReminderKind::CheckIn => self.check_in_time,
            ReminderKind::CheckOut => self.check_out_time,
        }
    }

    /// True when an edit touches anything reminder text or timing depends on.
    pub fn reminder_fields_differ(&self, other: &Booking) -> bool {
        self.interval != other.interval
            || self.check_in_time != other.check_in_time
            || self.check_out_time != other.check_out_time
            || self.customer_name != other.customer_name
    }
}

impl BaseEntity for Booking {
    const ENTITY: &'static str = "Booking";
    fn id(&self) -> i32 {
        self.id
    }
    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Booking(id={}, property_id={}, customer='{}', dates={}, paid={})",
            self.id, self.property_id, self.customer_name, self.interval, self.is_paid
        )
    }
}

// =========
// Reminder
// =========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i32,
    pub booking_id: i32,
    pub kind: ReminderKind,
    pub scheduled_for: NaiveDateTime,
    pub title: String,
    pub message: String,
    pub is_read: bool,
}

impl Reminder {
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.scheduled_for <= now
    }
}

impl BaseEntity for Reminder {
    const ENTITY: &'static str = "Notification";
    fn id(&self) -> i32 {
        self.id
    }
    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reminder(id={}, booking_id={}, kind={}, scheduled_for={}, read={})",
            self.id,
            self.booking_id,
            self.kind,
            self.scheduled_for.format("%Y-%m-%d %H:%M"),
            self.is_read
        )
    }
}

// =============
// Housekeeping
// =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousekeepingTask {
    pub id: i32,
    pub property_id: i32,
    pub booking_id: i32,
    pub is_clean: bool,
    pub cleaned_by: Option<i32>,
    pub cleaned_at: Option<NaiveDateTime>,
    pub verified_by_owner: bool,
}

impl HousekeepingTask {
    pub fn for_booking(booking: &Booking) -> Self {
        Self {
            id: 0,
            property_id: booking.property_id,
            booking_id: booking.id,
            is_clean: false,
            cleaned_by: None,
            cleaned_at: None,
            verified_by_owner: false,
        }
    }

    pub fn mark_clean(&mut self, cleaned_by: i32, at: NaiveDateTime) {
        self.is_clean = true;
        self.cleaned_by = Some(cleaned_by);
        self.cleaned_at = Some(at);
    }

    /// Reopens the task; any owner verification is dropped with it.
    pub fn mark_dirty(&mut self) {
        self.is_clean = false;
        self.cleaned_by = None;
        self.cleaned_at = None;
        self.verified_by_owner = false;
    }

    pub fn verify(&mut self) -> Result<()> {
        if !self.is_clean {
            return Err(Error::validation(format!(
                "Housekeeping task {} cannot be verified before it is cleaned.",
                self.id
            )));
        }
        self.verified_by_owner = true;
        Ok(())
    }
}

impl BaseEntity for HousekeepingTask {
    const ENTITY: &'static str = "Housekeeping";
    fn id(&self) -> i32 {
        self.id
    }
    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

// ========
// Invoice
// ========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceAdjustment {
    pub id: i32,
    pub name: String,
    pub amount: Decimal,
    pub kind: AdjustmentKind,
}

impl InvoiceAdjustment {
    /// `amount` is a magnitude; only `kind` carries the sign.
    pub fn new(name: impl Into<String>, amount: Decimal, kind: AdjustmentKind) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::validation("Adjustment name is required."));
        }
        if amount <= Decimal::ZERO {
            return Err(Error::validation(format!(
                "Adjustment '{}' must have a positive amount.",
                name
            )));
        }
        Ok(Self {
            id: 0,
            name,
            amount,
            kind,
        })
    }

    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            AdjustmentKind::Add => self.amount,
            AdjustmentKind::Subtract => -self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredInvoice")]
pub struct Invoice {
    pub id: i32,
    pub booking_id: i32,
    pub invoice_number: String,
    amount: Decimal,
    adjustments: Vec<InvoiceAdjustment>,
    total: Decimal,
    pub status: InvoiceStatus,
    pub created_at: NaiveDateTime,
}

impl Invoice {
    pub fn new(
        booking_id: i32,
        invoice_number: impl Into<String>,
        amount: Decimal,
        adjustments: Vec<InvoiceAdjustment>,
        created_at: NaiveDateTime,
    ) -> Self {
        let mut invoice = Self {
            id: 0,
            booking_id,
            invoice_number: invoice_number.into(),
            amount,
            adjustments: Vec::new(),
            total: Decimal::ZERO,
            status: InvoiceStatus::Draft,
            created_at,
        };
        invoice.set_adjustments(adjustments);
        invoice
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn adjustments(&self) -> &[InvoiceAdjustment] {
        &self.adjustments
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn set_amount(&mut self, amount: Decimal) {
        self.amount = amount;
        self.total = compute_total(self.amount, &self.adjustments);
    }

    /// Replaces the adjustment list, numbering entries by position.
    pub fn set_adjustments(&mut self, adjustments: Vec<InvoiceAdjustment>) {
        self.adjustments = adjustments
            .into_iter()
            .enumerate()
            .map(|(idx, mut adj)| {
                adj.id = idx as i32 + 1;
                adj
            })
            .collect();
        self.total = compute_total(self.amount, &self.adjustments);
    }
}

/// Invoice as read back from storage. Any stored `total` is ignored and
/// recomputed from the amount and adjustments.
#[derive(Deserialize)]
struct StoredInvoice {
    id: i32,
    booking_id: i32,
    invoice_number: String,
    amount: Decimal,
    #[serde(default)]
    adjustments: Vec<InvoiceAdjustment>,
    #[serde(default)]
    status: InvoiceStatus,
    created_at: NaiveDateTime,
}

impl From<StoredInvoice> for Invoice {
    fn from(stored: StoredInvoice) -> Self {
        let mut invoice = Invoice::new(
            stored.booking_id,
            stored.invoice_number,
            stored.amount,
            stored.adjustments,
            stored.created_at,
        );
        invoice.id = stored.id;
        invoice.status = stored.status;
        invoice
    }
}

impl BaseEntity for Invoice {
    const ENTITY: &'static str = "Invoice";
    fn id(&self) -> i32 {
        self.id
    }
    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}
