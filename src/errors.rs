use chrono::NaiveDate;
use thiserror::Error;

// Re-export a simple Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error set shared by the booking core and its ambient layers.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Input validation ---------------------------------------------------
    /// Malformed date/time/enum input or a rule violated by a draft.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Check-out before check-in.
    #[error("Invalid interval: check-out {end} is before check-in {start}.")]
    InvalidInterval { start: NaiveDate, end: NaiveDate },

    // ---- Bookings / Domain --------------------------------------------------
    /// The candidate dates overlap a booking already held by the property.
    #[error("Booking conflict: {message}")]
    BookingConflict { booking_id: i32, message: String },

    /// Lookup of an entity that does not exist in the store.
    #[error("{entity} with id {id} not found.")]
    NotFound { entity: &'static str, id: i32 },

    // ---- Config -------------------------------------------------------------
    /// Any issue initializing/reading config (file missing, invalid JSON, etc.)
    #[error("Config error: {0}")]
    Config(String),

    // ---- Plumbing / Wrappers ------------------------------------------------
    /// IO passthrough (config and log files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde JSON passthrough.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ----------------------- Convenience constructors ----------------------------

impl Error {
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Error::NotFound { entity, id }
    }
}

/// Map an `Option<T>` into `Result<T, Error::Validation>` with a custom message.
pub fn require<T, S: Into<String>>(opt: Option<T>, msg: S) -> Result<T> {
    opt.ok_or_else(|| Error::Validation(msg.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_constructor_wraps_message() {
        let err = Error::validation("bad amount");
        match err {
            Error::Validation(msg) => assert_eq!(msg, "bad amount"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn config_constructor_wraps_message() {
        let err = Error::config("config missing");
        assert_eq!(err.to_string(), "Config error: config missing");
    }

    #[test]
    fn not_found_formats_entity_and_id() {
        let err = Error::not_found("Booking", 7);
        assert_eq!(err.to_string(), "Booking with id 7 not found.");
    }

    #[test]
    fn require_returns_value_when_present() {
        assert_eq!(require(Some(4), "missing").unwrap(), 4);
    }

    #[test]
    fn require_errors_with_message_when_missing() {
        let err = require::<i32, _>(None, "missing").unwrap_err();
        match err {
            Error::Validation(msg) => assert_eq!(msg, "missing"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_interval_formats_both_dates() {
        let err = Error::InvalidInterval {
            start: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid interval: check-out 2024-06-10 is before check-in 2024-06-15."
        );
    }

    #[test]
    fn conflict_displays_rendered_message() {
        let err = Error::BookingConflict {
            booking_id: 3,
            message: "overlap".to_string(),
        };
        assert_eq!(err.to_string(), "Booking conflict: overlap");
    }

    #[test]
    fn io_error_formats_message() {
        let raw = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err = Error::from(raw);
        assert_eq!(err.to_string(), "I/O error: disk");
    }

    #[test]
    fn json_error_formats_message() {
        let raw = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let expected = format!("JSON error: {}", raw);
        let err = Error::from(raw);
        assert_eq!(err.to_string(), expected);
    }
}
