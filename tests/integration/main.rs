mod booking_flow;
mod common;
mod config;
mod reminders;
