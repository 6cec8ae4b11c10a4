pub mod inbox;
pub mod lifecycle;
pub mod policy;
#[cfg(test)]
mod tests;

pub use inbox::Inbox;
pub use lifecycle::{
    LifecycleState, ReminderChangeSet, ReminderLifecycle, ReminderSubject, ScheduledReminder,
};
pub use policy::{ReminderPlan, ReminderSettings, compute_reminder};
