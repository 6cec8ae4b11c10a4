
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::availability::{self, Availability};
use crate::config::ConfigKey;
use crate::core::clock::{Clock, SystemClock};
use crate::core::context::AppContext;
use crate::core::interval::Interval;
use crate::core::models::{Booking, BookingDraft, InvoiceAdjustment, Property};
use crate::core::repository::{Repository, Sort};
use crate::core::types::{InvoiceStatus, PaletteColor, SettingsChangePolicy};
use crate::errors::{Error, Result};
use crate::housekeeping::Housekeeping;
use crate::invoice;
use crate::invoice::total::balance_due;
use crate::logging::LogTarget;
use crate::reminders::lifecycle::AppliedChanges;
use crate::reminders::{Inbox, ReminderChangeSet, ReminderSettings, ReminderSubject};
use crate::reports::Report;

/// Front desk for one owner's properties. Every write goes through
/// `&mut self`, so check-then-insert for a property cannot interleave.
pub struct BookingDesk<'a> {
    ctx: &'a mut AppContext,
    clock: Box<dyn Clock>,
}

impl<'a> BookingDesk<'a> {
    pub fn new(ctx: &'a mut AppContext) -> Self {
        Self::with_clock(ctx, Box::new(SystemClock))
    }

    pub fn with_clock(ctx: &'a mut AppContext, clock: Box<dyn Clock>) -> Self {
        Self { ctx, clock }
    }

    pub fn context(&self) -> &AppContext {
        &*self.ctx
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn reminder_settings(&self) -> ReminderSettings {
        self.ctx.config.reminder_settings()
    }

    // ==========
    // Properties
    // ==========

    pub fn add_property(&mut self, owner_id: i32, name: &str) -> Result<i32> {
        let property = Property::new(owner_id, name)?;
        let id = self.ctx.properties.insert(property);
        self.log(format!("Property with id {id} added ('{}')", name.trim()));
        Ok(id)
    }

    // ========
    // Bookings
    // ========

    /// Bookings of a property ordered by check-in.
    pub fn bookings_for(&self, property_id: i32) -> Vec<&Booking> {
        self.ctx
            .bookings
            .query()
            .r#where(move |b| b.property_id == property_id)
            .order_with(|a, b| a.check_in().cmp(&b.check_in()))
            .collect()
    }

    pub fn check_availability(
        &self,
        property_id: i32,
        candidate: &Interval,
        exclude: Option<i32>,
    ) -> Availability<'_> {
        availability::check_availability(
            self.ctx.bookings.values(Sort::Unordered),
            property_id,
            candidate,
            exclude,
        )
    }

    pub fn booking_on(&self, property_id: i32, date: NaiveDate) -> Option<&Booking> {
        availability::booking_on(self.bookings_for(property_id), date)
    }

    pub fn calendar(
        &self,
        property_id: i32,
        window: &Interval,
    ) -> BTreeMap<NaiveDate, PaletteColor> {
        availability::booked_dates(self.bookings_for(property_id), window)
    }

    pub fn create_booking(&mut self, property_id: i32, draft: BookingDraft) -> Result<i32> {
        self.ctx.properties.get(property_id)?;
        draft.validate()?;
        self.check_availability(property_id, &draft.interval, None)
            .into_result()?;

        let id = self.ctx.bookings.insert(Booking::new(property_id, draft));
        let booking = self.ctx.bookings.get(id)?;
        let task_id = Housekeeping::new(&mut self.ctx.housekeeping).open_for_booking(booking);
        self.log(format!(
            "Booking with id {id} created for property {property_id} ({})",
            booking.interval
        ));
        self.log(format!(
            "Housekeeping task with id {task_id} opened for booking {id}"
        ));

        let now = self.now();
        let settings = self.reminder_settings();
        let ctx = &mut *self.ctx;
        let booking = ctx.bookings.get(id)?;
        let changes = ctx.lifecycle.on_booking_created(
            ReminderSubject::new(booking, property_name(&ctx.properties, property_id)),
            &settings,
            now,
        );
        self.apply_reminders(id, &changes);
        Ok(id)
    }

    /// Re-validates and re-checks availability excluding the booking itself.
    /// Reminders are recomputed when dates, times or the guest name change.
    pub fn update_booking(&mut self, id: i32, draft: BookingDraft) -> Result<()> {
        let before = self.ctx.bookings.get(id)?.clone();
        draft.validate()?;
        self.check_availability(before.property_id, &draft.interval, Some(id))
            .into_result()?;

        let booking = self.ctx.bookings.get_mut(id)?;
        booking.modify(draft);
        let reminders_stale = booking.reminder_fields_differ(&before);
        let interval = booking.interval;
        self.log(format!("Booking with id {id} updated ({interval})"));

        if !reminders_stale {
            return Ok(());
        }
        let now = self.now();
        let settings = self.reminder_settings();
        let ctx = &mut *self.ctx;
        let booking = ctx.bookings.get(id)?;
        let changes = ctx.lifecycle.on_booking_updated(
            ReminderSubject::new(booking, property_name(&ctx.properties, before.property_id)),
            &settings,
            now,
        );
        self.apply_reminders(id, &changes);
        Ok(())
    }

    /// Removes the booking with its housekeeping tasks, reminders and
    /// invoices.
    pub fn delete_booking(&mut self, id: i32) -> Result<Booking> {
        self.ctx.bookings.get(id)?;

        let tasks = Housekeeping::new(&mut self.ctx.housekeeping).delete_for_booking(id);
        let changes = self.ctx.lifecycle.on_booking_deleted(id);
        self.apply_reminders(id, &changes);
        let invoices = self
            .ctx
            .invoices
            .remove_where(|inv| inv.booking_id == id)
            .len();
        let booking = self.ctx.bookings.delete(id)?;
        self.log(format!(
            "Booking with id {id} deleted ({tasks} housekeeping task(s), {invoices} invoice(s))"
        ));
        Ok(booking)
    }

    // =========
    // Reminders
    // =========

    /// Saves new settings. Under `RescheduleUpcoming` live bookings are
    /// recomputed right away.
    pub fn change_settings(&mut self, settings: ReminderSettings) -> Result<AppliedChanges> {
        self.ctx.config.set_reminder_settings(&settings)?;
        self.ctx.sync_config();
        let now = self.now();

        let ctx = &mut *self.ctx;
        let bookings = ctx.bookings.values(Sort::IdAsc);
        let subjects = bookings
            .iter()
            .map(|b| ReminderSubject::new(b, property_name(&ctx.properties, b.property_id)));
        let changes = ctx.lifecycle.on_settings_changed(&settings, subjects, now);
        let applied = changes.apply_to(&mut ctx.reminders);

        self.log(format!(
            "Reminder settings changed under {} policy: {} retired, {} scheduled",
            self.ctx.lifecycle.policy(),
            applied.retired,
            applied.inserted.len()
        ));
        Ok(applied)
    }

    pub fn set_settings_change_policy(&mut self, policy: SettingsChangePolicy) -> Result<()> {
        self.set_config(ConfigKey::SettingsChangePolicy.as_ref(), policy.as_ref())
    }

    /// Edits one config key and applies it to the running desk.
    pub fn set_config(&mut self, key: &str, value: &str) -> Result<()> {
        self.ctx.config.set(key, value)?;
        self.ctx.sync_config();
        if let Some((key, old, new)) = self.ctx.config.take_last_change() {
            self.log(format!("Config {key} changed from {old} to {new}"));
        }
        Ok(())
    }

    /// All-or-nothing edit of several keys, applied to the running desk.
    pub fn set_config_many<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.ctx.config.set_many(pairs)?;
        self.ctx.sync_config();
        self.log("Config updated".to_string());
        Ok(())
    }

    /// Revenue figures as of the desk clock's date.
    pub fn report(&self) -> Report {
        let bookings = self.ctx.bookings.values(Sort::IdAsc);
        Report::build(&bookings, &self.ctx.properties, self.now().date())
    }

    pub fn inbox(&mut self) -> Inbox<'_> {
        Inbox::new(&mut self.ctx.reminders)
    }

    pub fn housekeeping(&mut self) -> Housekeeping<'_> {
        Housekeeping::new(&mut self.ctx.housekeeping)
    }

    // ========
    // Invoices
    // ========

    pub fn issue_invoice(
        &mut self,
        booking_id: i32,
        adjustments: Vec<InvoiceAdjustment>,
    ) -> Result<i32> {
        let booking = self.ctx.bookings.get(booking_id)?;
        let invoice = invoice::draft_for_booking(
            booking,
            adjustments,
            self.clock.now_millis(),
            self.clock.now(),
        )?;
        let number = invoice.invoice_number.clone();
        let total = invoice.total();
        let id = self.ctx.invoices.insert(invoice);
        self.log(format!(
            "Invoice {number} (id {id}) issued for booking {booking_id}, total {}",
            invoice::total::money(total)
        ));
        Ok(id)
    }

    /// Replaces an invoice's adjustments; returns the recomputed total.
    pub fn update_invoice_adjustments(
        &mut self,
        invoice_id: i32,
        adjustments: Vec<InvoiceAdjustment>,
    ) -> Result<Decimal> {
        let invoice = self.ctx.invoices.get_mut(invoice_id)?;
        if invoice.status != InvoiceStatus::Draft {
            return Err(Error::validation(format!(
                "Invoice {} is {} and can no longer be edited.",
                invoice.invoice_number, invoice.status
            )));
        }
        invoice.set_adjustments(adjustments);
        let total = invoice.total();
        self.log(format!(
            "Invoice with id {invoice_id} adjustments updated, total {}",
            invoice::total::money(total)
        ));
        Ok(total)
    }

    pub fn set_invoice_status(&mut self, invoice_id: i32, status: InvoiceStatus) -> Result<()> {
        let invoice = self.ctx.invoices.get_mut(invoice_id)?;
        let old = invoice.status;
        invoice.status = status;
        self.log(format!(
            "Invoice with id {invoice_id} status changed from {old} to {status}"
        ));
        Ok(())
    }

    /// What the guest still owes: total minus advance, then adjustments.
    pub fn balance_due(
        &self,
        booking_id: i32,
        adjustments: &[InvoiceAdjustment],
    ) -> Result<Decimal> {
        let booking = self.ctx.bookings.get(booking_id)?;
        Ok(balance_due(booking, adjustments))
    }

    fn apply_reminders(&mut self, booking_id: i32, changes: &ReminderChangeSet) {
        if changes.is_empty() {
            return;
        }
        let applied = changes.apply_to(&mut self.ctx.reminders);
        let due = changes.due().count();
        self.log(format!(
            "Reminders for booking {booking_id}: {} retired, {} scheduled ({due} already due)",
            applied.retired,
            applied.inserted.len()
        ));
    }

    fn log(&self, message: String) {
        self.ctx.logger.info(message, LogTarget::FileOnly);
    }
}

fn property_name(properties: &Repository<Property>, property_id: i32) -> &str {
    properties
        .get(property_id)
        .map(|p| p.name.as_str())
        .unwrap_or("")
}
