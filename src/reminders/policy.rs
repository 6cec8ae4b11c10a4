use crate::core::models::Booking;
use crate::core::types::{ClockTime, ReminderKind};
use crate::extensions::chrono::{DateExt, DateTimeExt};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive};

/// Per-user reminder preferences. Passed explicitly to every computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    pub check_in_enabled: bool,
    pub check_out_enabled: bool,
    pub check_in_lead_hours: f64,
    pub check_out_lead_hours: f64,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            check_in_enabled: true,
            check_out_enabled: true,
            check_in_lead_hours: 24.0,
            check_out_lead_hours: 24.0,
        }
    }
}

impl ReminderSettings {
    pub fn is_enabled(&self, kind: ReminderKind) -> bool {
        match kind {
            ReminderKind::CheckIn => self.check_in_enabled,
            ReminderKind::CheckOut => self.check_out_enabled,
        }
    }

    pub fn lead_hours(&self, kind: ReminderKind) -> f64 {
        match kind {
            ReminderKind::CheckIn => self.check_in_lead_hours,
            ReminderKind::CheckOut => self.check_out_lead_hours,
        }
    }
}

/// Lead times offered in the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumIterDerive)]
pub enum LeadTimePreset {
    #[strum(to_string = "2 min before")]
    TwoMinutes,
    #[strum(to_string = "3 min before")]
    ThreeMinutes,
    #[strum(to_string = "1 hour before")]
    OneHour,
    #[strum(to_string = "6 hours before")]
    SixHours,
    #[strum(to_string = "12 hours before")]
    TwelveHours,
    #[strum(to_string = "1 day before")]
    OneDay,
    #[strum(to_string = "2 days before")]
    TwoDays,
    #[strum(to_string = "3 days before")]
    ThreeDays,
    #[strum(to_string = "1 week before")]
    OneWeek,
}

impl LeadTimePreset {
    pub fn hours(self) -> f64 {
        match self {
            LeadTimePreset::TwoMinutes => 2.0 / 60.0,
            LeadTimePreset::ThreeMinutes => 3.0 / 60.0,
            LeadTimePreset::OneHour => 1.0,
            LeadTimePreset::SixHours => 6.0,
            LeadTimePreset::TwelveHours => 12.0,
            LeadTimePreset::OneDay => 24.0,
            LeadTimePreset::TwoDays => 48.0,
            LeadTimePreset::ThreeDays => 72.0,
            LeadTimePreset::OneWeek => 168.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderPlan {
    Future { scheduled_for: NaiveDateTime },
    /// Computed at or before `now`; still persisted so the inbox shows it.
    AlreadyDue { scheduled_for: NaiveDateTime },
    Suppressed,
}

impl ReminderPlan {
    pub fn scheduled_for(&self) -> Option<NaiveDateTime> {
        match self {
            ReminderPlan::Future { scheduled_for } | ReminderPlan::AlreadyDue { scheduled_for } => {
                Some(*scheduled_for)
            }
            ReminderPlan::Suppressed => None,
        }
    }

    pub fn is_due(&self) -> bool {
        matches!(self, ReminderPlan::AlreadyDue { .. })
    }
}

/// The instant the booking's check-in/check-out happens minus the lead time.
/// Negative or NaN lead hours count as zero; leads reaching past the
/// representable range clamp to the earliest instant.
pub fn reminder_instant(
    kind: ReminderKind,
    date: NaiveDate,
    time: Option<ClockTime>,
    lead_hours: f64,
) -> NaiveDateTime {
    let at = time.unwrap_or_else(|| kind.default_time());
    date.and_time(at.0).hours_before(lead_hours)
}

pub fn compute_reminder(
    kind: ReminderKind,
    date: NaiveDate,
    time: Option<ClockTime>,
    lead_hours: f64,
    now: NaiveDateTime,
) -> ReminderPlan {
    let scheduled_for = reminder_instant(kind, date, time, lead_hours);
    if scheduled_for > now {
        ReminderPlan::Future { scheduled_for }
    } else {
        ReminderPlan::AlreadyDue { scheduled_for }
    }
}

/// Settings-aware plan for one side of a booking.
pub fn plan_for_booking(
    kind: ReminderKind,
    booking: &Booking,
    settings: &ReminderSettings,
    now: NaiveDateTime,
) -> ReminderPlan {
    if !settings.is_enabled(kind) {
        return ReminderPlan::Suppressed;
    }
    compute_reminder(
        kind,
        booking.date_for(kind),
        booking.time_for(kind),
        settings.lead_hours(kind),
        now,
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderText {
    pub title: String,
    pub message: String,
}

/// e.g. "Ana is checking in to Sea Cabin on Mon, Jun 10 at 2:00 PM".
pub fn reminder_text(
    kind: ReminderKind,
    customer_name: &str,
    property_name: &str,
    date: NaiveDate,
    time: Option<ClockTime>,
) -> ReminderText {
    let at = time.unwrap_or_else(|| kind.default_time());
    let day = date.weekday_short();
    let verb = match kind {
        ReminderKind::CheckIn => "is checking in to",
        ReminderKind::CheckOut => "is checking out from",
    };
    ReminderText {
        title: kind.title().to_string(),
        message: format!(
            "{customer_name} {verb} {property_name} on {day} at {}",
            at.twelve_hour()
        ),
    }
}
