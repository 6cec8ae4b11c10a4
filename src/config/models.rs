use crate::core::types::{Bool, SettingsChangePolicy};
use crate::errors::Error;
use crate::reminders::policy::LeadTimePreset;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<(), Error>;
    fn description(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderToggleConfigItem {
    pub value: Bool,
    pub description: String,
}

impl ReminderToggleConfigItem {
    pub fn check_in() -> Self {
        Self {
            value: Bool(true),
            description: "Notify before a guest checks in.".into(),
        }
    }

    pub fn check_out() -> Self {
        Self {
            value: Bool(true),
            description: "Notify before a guest checks out.".into(),
        }
    }
}

impl ConfigItem<Bool> for ReminderToggleConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        Ok(self.value = Bool::try_from_str(new_value)?)
    }
    fn description(&self) -> &str {
        &self.description
    }
}

/// Hours between the reminder and the check-in/check-out it announces.
/// Accepts a non-negative number or a preset label such as "1 day before".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadHoursConfigItem {
    pub value: f64,
    pub description: String,
}

impl LeadHoursConfigItem {
    pub fn check_in() -> Self {
        Self {
            value: LeadTimePreset::OneDay.hours(),
            description: "Hours before check-in to send the reminder.".into(),
        }
    }

    pub fn check_out() -> Self {
        Self {
            value: LeadTimePreset::OneDay.hours(),
            description: "Hours before check-out to send the reminder.".into(),
        }
    }

    pub fn parse(raw: &str) -> Result<f64, Error> {
        let raw = raw.trim();
        if let Some(preset) =
            LeadTimePreset::iter().find(|p| p.to_string().eq_ignore_ascii_case(raw))
        {
            return Ok(preset.hours());
        }
        match raw.parse::<f64>() {
            Ok(hours) if hours.is_finite() && hours >= 0.0 => Ok(hours),
            _ => Err(Error::Validation(format!(
                "Invalid lead time: '{}'. Use a number of hours >= 0 or one of: {}",
                raw,
                LeadTimePreset::iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

impl ConfigItem<f64> for LeadHoursConfigItem {
    fn get_value(&self) -> &f64 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        Ok(self.value = Self::parse(new_value)?)
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsChangePolicyConfigItem {
    pub value: SettingsChangePolicy,
    pub description: String,
}

impl Default for SettingsChangePolicyConfigItem {
    fn default() -> Self {
        Self {
            value: SettingsChangePolicy::default(),
            description: "What happens to scheduled reminders when reminder settings change."
                .into(),
        }
    }
}

impl ConfigItem<SettingsChangePolicy> for SettingsChangePolicyConfigItem {
    fn get_value(&self) -> &SettingsChangePolicy {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        Ok(self.value = SettingsChangePolicy::try_from(new_value)?)
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for FileLoggingConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Enable writing log messages to file.".into(),
        }
    }
}

impl ConfigItem<Bool> for FileLoggingConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        Ok(self.value = Bool::try_from_str(new_value)?)
    }
    fn description(&self) -> &str {
        &self.description
    }
}
