use crate::config::Config;
use crate::core::models::{Booking, HousekeepingTask, Invoice, Property, Reminder};
use crate::core::repository::Repository;
use crate::errors::Result;
use crate::logging::Logger;
use crate::reminders::ReminderLifecycle;
use std::path::PathBuf;

/// Everything one owner's session works against: configuration, stores,
/// the reminder state machine and the logger.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub properties: Repository<Property>,
    pub bookings: Repository<Booking>,
    pub reminders: Repository<Reminder>,
    pub housekeeping: Repository<HousekeepingTask>,
    pub invoices: Repository<Invoice>,
    pub lifecycle: ReminderLifecycle,
    pub logger: Logger,
    pub logs_dir: PathBuf,
}

impl AppContext {
    pub fn new_with_paths(config_path: PathBuf, logs_dir: PathBuf) -> Result<Self> {
        let config = Config::load_from(&config_path)?;
        Ok(Self::from_config(config, logs_dir))
    }

    pub fn from_config(config: Config, logs_dir: PathBuf) -> Self {
        let logger = Logger::new(&logs_dir, config.file_logging_enabled());
        let lifecycle = ReminderLifecycle::new(config.settings_change_policy());
        Self {
            config,
            properties: Repository::new(),
            bookings: Repository::new(),
            reminders: Repository::new(),
            housekeeping: Repository::new(),
            invoices: Repository::new(),
            lifecycle,
            logger,
            logs_dir,
        }
    }

    /// Pushes config values that live outside `Config` into the logger and
    /// the reminder lifecycle. Call after any config edit.
    pub fn sync_config(&mut self) {
        self.logger
            .set_file_logging_enabled(self.config.file_logging_enabled());
        self.lifecycle
            .set_policy(self.config.settings_change_policy());
    }

    pub fn config_path(&self) -> PathBuf {
        self.config.path().to_path_buf()
    }
}
