use chrono::{Duration, NaiveDate, NaiveDateTime};

pub trait DateTimeExt {
    /// `self` moved back by `hours`, rounded to the millisecond. Negative or
    /// NaN hours count as zero; results before the representable range clamp
    /// to `NaiveDateTime::MIN`.
    fn hours_before(self, hours: f64) -> NaiveDateTime;
}

impl DateTimeExt for NaiveDateTime {
    fn hours_before(self, hours: f64) -> NaiveDateTime {
        let millis = (hours.max(0.0) * 3_600_000.0).round() as i64;
        self.checked_sub_signed(Duration::milliseconds(millis))
            .unwrap_or(NaiveDateTime::MIN)
    }
}

pub trait DateExt {
    /// `6/10/2024`
    fn us_short(&self) -> String;
    /// `Mon, Jun 10`
    fn weekday_short(&self) -> String;
}

impl DateExt for NaiveDate {
    fn us_short(&self) -> String {
        self.format("%-m/%-d/%Y").to_string()
    }

    fn weekday_short(&self) -> String {
        self.format("%a, %b %-d").to_string()
    }
}
