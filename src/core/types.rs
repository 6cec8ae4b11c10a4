use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use crate::extensions::string::ToDashSeparators;
use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date(pub NaiveDate);

#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum DateFormat {
    #[strum(serialize = "%Y-%m-%d", to_string = "%Y-%m-%d")]
    YmdDash,
    #[strum(serialize = "%m-%d-%Y", to_string = "%m-%d-%Y")]
    MdYDash,
    #[strum(serialize = "%Y/%m/%d", to_string = "%Y/%m/%d")]
    YmdSlash,
    #[strum(serialize = "%m/%d/%Y", to_string = "%m/%d/%Y")]
    MdYSlash,
    #[strum(serialize = "%m-%d", to_string = "%m-%d")]
    MdDash,
}

#[derive(Debug, Clone)]
struct DateParseSpec {
    input: String,
    date_format: DateFormat,
}

impl DateFormat {
    fn build_parse_spec(self, input: &str) -> DateParseSpec {
        match self {
            DateFormat::YmdDash | DateFormat::YmdSlash => DateParseSpec {
                input: input.to_owned(),
                date_format: DateFormat::YmdDash,
            },
            DateFormat::MdYDash | DateFormat::MdYSlash => DateParseSpec {
                input: input.to_owned(),
                date_format: DateFormat::MdYDash,
            },
            DateFormat::MdDash => {
                let current_year = Local::now().date_naive().year();
                DateParseSpec {
                    input: format!("{current_year}-{input}"),
                    date_format: DateFormat::YmdDash,
                }
            }
        }
    }
}

impl Date {
    pub fn usage() -> String {
        let today = Local::now().date_naive();
        let formats = DateFormat::iter()
            .map(|df| today.format(df.as_ref()).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Supported formats: {}", formats)
    }

    /// Parses a calendar date. Slashes are normalized to dashes first, so the
    /// slash formats resolve through their dash counterparts.
    pub fn try_from_str(input: &str) -> Result<Self> {
        let input = input.to_dash_separators();

        for f in DateFormat::iter() {
            let spec = f.build_parse_spec(&input);
            if let Ok(date) = NaiveDate::parse_from_str(&spec.input, spec.date_format.as_ref()) {
                return Ok(Date(date));
            }
        }

        Err(Error::Validation(format!(
            "Invalid date format: '{}'. {}",
            input,
            Self::usage()
        )))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Wall-clock time of day for check-in/check-out (local, minute precision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime(pub NaiveTime);

#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr)]
enum ClockFormat {
    #[strum(serialize = "%H:%M")]
    TwentyFourHour,
    #[strum(serialize = "%I:%M%p")]
    Meridian,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(ClockTime)
            .ok_or_else(|| Error::Validation(format!("Invalid time {hour}:{minute:02}.")))
    }

    /// Accepts `14:00`, `2:00 PM`, `2PM`.
    pub fn try_from_str(raw: &str) -> Result<Self> {
        let mut token: String = raw
            .split_whitespace()
            .collect::<String>()
            .to_ascii_uppercase();
        let has_meridian = token.ends_with("AM") || token.ends_with("PM");
        if has_meridian && !token.contains(':') {
            let idx = token.len() - 2;
            token.insert_str(idx, ":00");
        }

        for f in ClockFormat::iter() {
            if let Ok(t) = NaiveTime::parse_from_str(&token, f.as_ref()) {
                return Ok(ClockTime(t));
            }
        }
        Err(Error::Validation(format!(
            "Invalid time format: '{}'. Supported formats: 14:00, 2:00 PM",
            raw.trim()
        )))
    }

    /// 12-hour rendering used in reminder text, e.g. `2:00 PM`.
    pub fn twelve_hour(&self) -> String {
        self.0.format("%-I:%M %p").to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<ClockTime, <D as Deserializer<'de>>::Error> {
        let s = String::deserialize(deserializer)?;
        ClockTime::try_from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    CheckIn,
    CheckOut,
}

impl ReminderKind {
    /// Used when a booking carries no explicit time for this side of the stay.
    pub fn default_time(self) -> ClockTime {
        let hour = match self {
            ReminderKind::CheckIn => 14,
            ReminderKind::CheckOut => 11,
        };
        ClockTime(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN))
    }

    pub fn title(self) -> &'static str {
        match self {
            ReminderKind::CheckIn => "Upcoming Check-in",
            ReminderKind::CheckOut => "Upcoming Check-out",
        }
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Validation(format!(
                "Unsupported reminder kind: '{}'. Valid kinds: {}",
                s.trim(),
                valid_csv::<ReminderKind>()
            ))
        })
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    Add,
    Subtract,
}

impl AdjustmentKind {
    pub fn sign(self) -> &'static str {
        match self {
            AdjustmentKind::Add => "+",
            AdjustmentKind::Subtract => "-",
        }
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Validation(format!(
                "Invalid adjustment type: '{}'. Valid types: {}",
                s.trim(),
                valid_csv::<AdjustmentKind>()
            ))
        })
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Validation(format!(
                "Invalid invoice status: '{}'. Valid statuses: {}",
                s.trim(),
                valid_csv::<InvoiceStatus>()
            ))
        })
    }
}

/// What happens to already-scheduled reminders when reminder settings change.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SettingsChangePolicy {
    #[default]
    KeepExisting,
    RescheduleUpcoming,
}

impl SettingsChangePolicy {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Validation(format!(
                "Invalid settings change policy: '{}'. Allowed policies: {}",
                s.trim(),
                valid_csv::<SettingsChangePolicy>()
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum BoolFormat {
    #[strum(serialize = "true", serialize = "True", to_string = "True")]
    TextTrue,

    #[strum(serialize = "false", serialize = "False", to_string = "False")]
    TextFalse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match BoolFormat::from_str(s.trim()) {
            Ok(fmt) => Ok(Bool(matches!(fmt, BoolFormat::TextTrue))),
            Err(_) => Err(Error::Validation(format!(
                "Invalid string value for boolean: '{}'. Valid values: {}",
                s,
                valid_csv::<BoolFormat>()
            ))),
        }
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Bool, <D as Deserializer<'de>>::Error> {
        let b = String::deserialize(deserializer)?;
        Bool::try_from_str(&b).map_err(serde::de::Error::custom)
    }
}

/// Fixed calendar palette; a booking's color is derived from the customer
/// name, see [`crate::core::color::color_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIterDerive)]
pub enum PaletteColor {
    #[strum(to_string = "#FF6B6B")]
    Coral,
    #[strum(to_string = "#4ECDC4")]
    Turquoise,
    #[strum(to_string = "#45B7D1")]
    SkyBlue,
    #[strum(to_string = "#96CEB4")]
    Sage,
    #[strum(to_string = "#FFEAA7")]
    Cream,
    #[strum(to_string = "#DDA0DD")]
    Plum,
    #[strum(to_string = "#98D8C8")]
    Mint,
    #[strum(to_string = "#F7DC6F")]
    Sunflower,
    #[strum(to_string = "#BB8FCE")]
    Lavender,
    #[strum(to_string = "#85C1E9")]
    LightBlue,
    #[strum(to_string = "#F8B500")]
    Amber,
    #[strum(to_string = "#00CED1")]
    DarkTurquoise,
    #[strum(to_string = "#FF69B4")]
    HotPink,
    #[strum(to_string = "#32CD32")]
    LimeGreen,
    #[strum(to_string = "#FF4500")]
    OrangeRed,
}

impl PaletteColor {
    pub fn hex(self) -> String {
        self.to_string()
    }
}
