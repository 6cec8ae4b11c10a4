pub mod availability;
pub mod config;
pub mod core;
pub mod desk;
pub mod errors;
pub mod extensions;
pub mod housekeeping;
pub mod invoice;
pub mod logging;
pub mod reminders;
pub mod reports;
