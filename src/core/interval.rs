use crate::core::types::Date;
use crate::errors::{Error, Result};
use crate::extensions::chrono::DateExt;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole-day occupancy `[start, end]`, both days inclusive.
///
/// A checkout day is still occupied, so a stay ending on the 15th and another
/// starting on the 15th overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", into = "RawInterval")]
pub struct Interval {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Serialize, Deserialize)]
struct RawInterval {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl TryFrom<RawInterval> for Interval {
    type Error = Error;
    fn try_from(raw: RawInterval) -> Result<Self> {
        Interval::new(raw.check_in, raw.check_out)
    }
}

impl From<Interval> for RawInterval {
    fn from(interval: Interval) -> Self {
        RawInterval {
            check_in: interval.start,
            check_out: interval.end,
        }
    }
}

impl Interval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn try_from_strs(check_in: &str, check_out: &str) -> Result<Self> {
        let start = Date::try_from_str(check_in)?;
        let end = Date::try_from_str(check_out)?;
        Self::new(start.0, end.0)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    /// Clip to `window`, `None` when they do not overlap.
    pub fn intersection(&self, window: &Interval) -> Option<Interval> {
        if !self.overlaps(window) {
            return None;
        }
        Some(Interval {
            start: self.start.max(window.start),
            end: self.end.min(window.end),
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start.us_short(), self.end.us_short())
    }
}
