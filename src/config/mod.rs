pub mod models;

use std::fs;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{
    ConfigItem, FileLoggingConfigItem, LeadHoursConfigItem, ReminderToggleConfigItem,
    SettingsChangePolicyConfigItem,
};
use crate::core::types::{Bool, SettingsChangePolicy};
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use crate::reminders::policy::ReminderSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKey {
    CheckInReminders,
    CheckOutReminders,
    CheckInLeadHours,
    CheckOutLeadHours,
    SettingsChangePolicy,
    FileLoggingEnabled,
}

/// On-disk layout. Every item is optional in the file and falls back to
/// its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default = "ReminderToggleConfigItem::check_in")]
    pub check_in_reminders: ReminderToggleConfigItem,
    #[serde(default = "ReminderToggleConfigItem::check_out")]
    pub check_out_reminders: ReminderToggleConfigItem,
    #[serde(default = "LeadHoursConfigItem::check_in")]
    pub check_in_lead_hours: LeadHoursConfigItem,
    #[serde(default = "LeadHoursConfigItem::check_out")]
    pub check_out_lead_hours: LeadHoursConfigItem,
    #[serde(default)]
    pub settings_change_policy: SettingsChangePolicyConfigItem,
    #[serde(default)]
    pub file_logging_enabled: FileLoggingConfigItem,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            check_in_reminders: ReminderToggleConfigItem::check_in(),
            check_out_reminders: ReminderToggleConfigItem::check_out(),
            check_in_lead_hours: LeadHoursConfigItem::check_in(),
            check_out_lead_hours: LeadHoursConfigItem::check_out(),
            settings_change_policy: SettingsChangePolicyConfigItem::default(),
            file_logging_enabled: FileLoggingConfigItem::default(),
        }
    }
}

/// A config edit: key, old value, new value.
pub type ConfigChange = (String, String, String);

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
    pub last_change: Option<ConfigChange>,
}

/// (key, description, current value) triples in `ConfigKey` order.
#[derive(Debug, Clone)]
pub struct ConfigRows(Vec<(String, String, String)>);

impl ConfigRows {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(String, String, String)> {
        self.0.iter()
    }
    pub fn get(&self, index: usize) -> Option<&(String, String, String)> {
        self.0.get(index)
    }
}
impl Index<usize> for ConfigRows {
    type Output = (String, String, String);
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Config {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::config(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::config(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        Ok(Self {
            path,
            data,
            last_change: None,
        })
    }

    /// Writes a default file at `path` and loads it.
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self {
            path: path.as_ref().to_path_buf(),
            data: ConfigFile::default(),
            last_change: None,
        };
        config.save()?;
        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn check_in_reminders(&self) -> bool {
        self.data.check_in_reminders.get_value().0
    }
    pub fn check_out_reminders(&self) -> bool {
        self.data.check_out_reminders.get_value().0
    }
    pub fn check_in_lead_hours(&self) -> f64 {
        *self.data.check_in_lead_hours.get_value()
    }
    pub fn check_out_lead_hours(&self) -> f64 {
        *self.data.check_out_lead_hours.get_value()
    }
    pub fn settings_change_policy(&self) -> SettingsChangePolicy {
        *self.data.settings_change_policy.get_value()
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    pub fn reminder_settings(&self) -> ReminderSettings {
        ReminderSettings {
            check_in_enabled: self.check_in_reminders(),
            check_out_enabled: self.check_out_reminders(),
            check_in_lead_hours: self.check_in_lead_hours(),
            check_out_lead_hours: self.check_out_lead_hours(),
        }
    }

    /// Stores all four reminder settings in one write.
    pub fn set_reminder_settings(&mut self, settings: &ReminderSettings) -> Result<()> {
        for hours in [settings.check_in_lead_hours, settings.check_out_lead_hours] {
            if !hours.is_finite() || hours < 0.0 {
                return Err(Error::validation(format!(
                    "Invalid lead time: {hours}. Lead hours must be >= 0."
                )));
            }
        }
        self.edit(|cfg| {
            cfg.check_in_reminders.value = Bool(settings.check_in_enabled);
            cfg.check_out_reminders.value = Bool(settings.check_out_enabled);
            cfg.check_in_lead_hours.value = settings.check_in_lead_hours;
            cfg.check_out_lead_hours.value = settings.check_out_lead_hours;
            Ok(())
        })
    }

    fn value_of(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::CheckInReminders => self.data.check_in_reminders.get_value().to_string(),
            ConfigKey::CheckOutReminders => self.data.check_out_reminders.get_value().to_string(),
            ConfigKey::CheckInLeadHours => self.check_in_lead_hours().to_string(),
            ConfigKey::CheckOutLeadHours => self.check_out_lead_hours().to_string(),
            ConfigKey::SettingsChangePolicy => self.settings_change_policy().to_string(),
            ConfigKey::FileLoggingEnabled => {
                self.data.file_logging_enabled.get_value().to_string()
            }
        }
    }

    fn description_of(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::CheckInReminders => self.data.check_in_reminders.description(),
            ConfigKey::CheckOutReminders => self.data.check_out_reminders.description(),
            ConfigKey::CheckInLeadHours => self.data.check_in_lead_hours.description(),
            ConfigKey::CheckOutLeadHours => self.data.check_out_lead_hours.description(),
            ConfigKey::SettingsChangePolicy => self.data.settings_change_policy.description(),
            ConfigKey::FileLoggingEnabled => self.data.file_logging_enabled.description(),
        }
    }

    pub fn rows(&self) -> ConfigRows {
        ConfigRows(
            ConfigKey::iter()
                .map(|key| {
                    (
                        key.to_string(),
                        self.description_of(key).to_string(),
                        self.value_of(key),
                    )
                })
                .collect(),
        )
    }

    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        let old = self.value_of(key);
        self.edit(|cfg| apply(cfg, key, new_value))?;
        self.last_change = Some((key.to_string(), old, self.value_of(key)));
        Ok(())
    }

    pub fn take_last_change(&mut self) -> Option<ConfigChange> {
        self.last_change.take()
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        let key = parse_key(key_str)?;
        self.set_key(key, new_value)
    }

    /// All-or-nothing: a bad pair leaves the stored config untouched.
    pub fn set_many<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.edit(|cfg| {
            for (k, v) in pairs {
                apply(cfg, parse_key(k.as_ref())?, v.as_ref())?;
            }
            Ok(())
        })
    }

    /// Applies `f` to a staged copy and keeps it only once it is on disk.
    fn edit<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ConfigFile) -> Result<()>,
    {
        let mut staged = self.data.clone();
        f(&mut staged)?;
        self.write(&staged)?;
        self.data = staged;
        Ok(())
    }

    fn save(&self) -> Result<()> {
        self.write(&self.data)
    }

    fn write(&self, data: &ConfigFile) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, json)
            .map_err(|e| Error::config(format!("Failed to write {}: {}", self.path.display(), e)))
    }
}

fn parse_key(key_str: &str) -> Result<ConfigKey> {
    ConfigKey::from_str(key_str.trim()).map_err(|_| {
        Error::config(format!(
            "Unknown configuration key '{}'. Valid keys: {}",
            key_str,
            valid_csv::<ConfigKey>()
        ))
    })
}

fn apply(cfg: &mut ConfigFile, key: ConfigKey, new_value: &str) -> Result<()> {
    match key {
        ConfigKey::CheckInReminders => cfg.check_in_reminders.set_value(new_value),
        ConfigKey::CheckOutReminders => cfg.check_out_reminders.set_value(new_value),
        ConfigKey::CheckInLeadHours => cfg.check_in_lead_hours.set_value(new_value),
        ConfigKey::CheckOutLeadHours => cfg.check_out_lead_hours.set_value(new_value),
        ConfigKey::SettingsChangePolicy => cfg.settings_change_policy.set_value(new_value),
        ConfigKey::FileLoggingEnabled => cfg.file_logging_enabled.set_value(new_value),
    }
}
