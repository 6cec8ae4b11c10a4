use std::collections::HashSet;

use chrono::NaiveDateTime;
use strum::IntoEnumIterator;

use crate::core::models::{Booking, Reminder};
use crate::core::repository::Repository;
use crate::core::types::{ReminderKind, SettingsChangePolicy};
use crate::reminders::policy::{ReminderPlan, ReminderSettings, plan_for_booking, reminder_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    NoReminders,
    Scheduled,
    /// Terminal: the booking was deleted.
    Retired,
}

/// A booking plus the property name its reminder text mentions.
#[derive(Debug, Clone, Copy)]
pub struct ReminderSubject<'a> {
    pub booking: &'a Booking,
    pub property_name: &'a str,
}

impl<'a> ReminderSubject<'a> {
    pub fn new(booking: &'a Booking, property_name: &'a str) -> Self {
        Self {
            booking,
            property_name,
        }
    }
}

/// A reminder ready to be written, never `Suppressed`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledReminder {
    pub booking_id: i32,
    pub kind: ReminderKind,
    pub plan: ReminderPlan,
    pub title: String,
    pub message: String,
}

impl ScheduledReminder {
    pub fn scheduled_for(&self) -> NaiveDateTime {
        self.plan.scheduled_for().unwrap_or(NaiveDateTime::MIN)
    }

    pub fn is_due(&self) -> bool {
        self.plan.is_due()
    }

    pub fn to_record(&self) -> Reminder {
        Reminder {
            id: 0,
            booking_id: self.booking_id,
            kind: self.kind,
            scheduled_for: self.scheduled_for(),
            title: self.title.clone(),
            message: self.message.clone(),
            is_read: false,
        }
    }
}

/// Writes produced by one lifecycle event. Retirements are applied before
/// new reminders are stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderChangeSet {
    /// Booking ids whose live reminders must be removed.
    pub retire: Vec<i32>,
    pub schedule: Vec<ScheduledReminder>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedChanges {
    pub retired: usize,
    pub inserted: Vec<i32>,
}

impl ReminderChangeSet {
    pub fn is_empty(&self) -> bool {
        self.retire.is_empty() && self.schedule.is_empty()
    }

    pub fn due(&self) -> impl Iterator<Item = &ScheduledReminder> {
        self.schedule.iter().filter(|r| r.is_due())
    }

    pub fn future(&self) -> impl Iterator<Item = &ScheduledReminder> {
        self.schedule.iter().filter(|r| !r.is_due())
    }

    fn merge(&mut self, other: ReminderChangeSet) {
        self.retire.extend(other.retire);
        self.schedule.extend(other.schedule);
    }

    /// Applies the set to a reminder store. If this is interrupted part way,
    /// the next full recompute for the booking retires whatever was left.
    pub fn apply_to(&self, store: &mut Repository<Reminder>) -> AppliedChanges {
        let mut applied = AppliedChanges::default();
        for booking_id in &self.retire {
            applied.retired += store.remove_where(|r| r.booking_id == *booking_id).len();
        }
        for reminder in &self.schedule {
            applied.inserted.push(store.insert(reminder.to_record()));
        }
        applied
    }
}

/// Tracks per-booking reminder state and turns booking events into
/// [`ReminderChangeSet`]s. Always recomputes in full, never patches.
///
/// Live bookings keep an entry in `scheduled`; a deleted booking leaves only
/// its id in `retired`, which lives as long as the session.
#[derive(Debug, Clone, Default)]
pub struct ReminderLifecycle {
    scheduled: HashSet<i32>,
    retired: HashSet<i32>,
    policy: SettingsChangePolicy,
}

impl ReminderLifecycle {
    pub fn new(policy: SettingsChangePolicy) -> Self {
        Self {
            scheduled: HashSet::new(),
            retired: HashSet::new(),
            policy,
        }
    }

    pub fn policy(&self) -> SettingsChangePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: SettingsChangePolicy) {
        self.policy = policy;
    }

    pub fn state(&self, booking_id: i32) -> LifecycleState {
        if self.retired.contains(&booking_id) {
            LifecycleState::Retired
        } else if self.scheduled.contains(&booking_id) {
            LifecycleState::Scheduled
        } else {
            LifecycleState::NoReminders
        }
    }

    /// Bookings currently in `Scheduled`.
    pub fn live_count(&self) -> usize {
        self.scheduled.len()
    }

    pub fn on_booking_created(
        &mut self,
        subject: ReminderSubject<'_>,
        settings: &ReminderSettings,
        now: NaiveDateTime,
    ) -> ReminderChangeSet {
        match self.state(subject.booking.id) {
            LifecycleState::Retired => ReminderChangeSet::default(),
            LifecycleState::Scheduled => self.recompute(subject, settings, now),
            LifecycleState::NoReminders => {
                let schedule = plan_all(subject, settings, now);
                self.scheduled.insert(subject.booking.id);
                ReminderChangeSet {
                    retire: Vec::new(),
                    schedule,
                }
            }
        }
    }

    pub fn on_booking_updated(
        &mut self,
        subject: ReminderSubject<'_>,
        settings: &ReminderSettings,
        now: NaiveDateTime,
    ) -> ReminderChangeSet {
        if self.state(subject.booking.id) == LifecycleState::Retired {
            return ReminderChangeSet::default();
        }
        self.recompute(subject, settings, now)
    }

    /// Idempotent: a second call for the same id yields an empty set.
    pub fn on_booking_deleted(&mut self, booking_id: i32) -> ReminderChangeSet {
        if self.state(booking_id) == LifecycleState::Retired {
            return ReminderChangeSet::default();
        }
        self.scheduled.remove(&booking_id);
        self.retired.insert(booking_id);
        ReminderChangeSet {
            retire: vec![booking_id],
            schedule: Vec::new(),
        }
    }

    /// Under `KeepExisting` nothing already scheduled changes. Under
    /// `RescheduleUpcoming` every live booking that has not checked out
    /// before `now`'s date is recomputed with the new settings.
    pub fn on_settings_changed<'a, I>(
        &mut self,
        settings: &ReminderSettings,
        subjects: I,
        now: NaiveDateTime,
    ) -> ReminderChangeSet
    where
        I: IntoIterator<Item = ReminderSubject<'a>>,
    {
        let mut changes = ReminderChangeSet::default();
        if self.policy == SettingsChangePolicy::KeepExisting {
            return changes;
        }
        let today = now.date();
        for subject in subjects {
            if self.state(subject.booking.id) == LifecycleState::Retired
                || subject.booking.check_out() < today
            {
                continue;
            }
            changes.merge(self.recompute(subject, settings, now));
        }
        changes
    }

    fn recompute(
        &mut self,
        subject: ReminderSubject<'_>,
        settings: &ReminderSettings,
        now: NaiveDateTime,
    ) -> ReminderChangeSet {
        let schedule = plan_all(subject, settings, now);
        self.scheduled.insert(subject.booking.id);
        ReminderChangeSet {
            retire: vec![subject.booking.id],
            schedule,
        }
    }
}

fn plan_all(
    subject: ReminderSubject<'_>,
    settings: &ReminderSettings,
    now: NaiveDateTime,
) -> Vec<ScheduledReminder> {
    let booking = subject.booking;
    ReminderKind::iter()
        .filter_map(|kind| {
            let plan = plan_for_booking(kind, booking, settings, now);
            if plan == ReminderPlan::Suppressed {
                return None;
            }
            let text = reminder_text(
                kind,
                &booking.customer_name,
                subject.property_name,
                booking.date_for(kind),
                booking.time_for(kind),
            );
            Some(ScheduledReminder {
                booking_id: booking.id,
                kind,
                plan,
                title: text.title,
                message: text.message,
            })
        })
        .collect()
}
