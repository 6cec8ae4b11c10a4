use chrono::NaiveDateTime;

use crate::core::models::Reminder;
use crate::core::repository::Repository;
use crate::errors::Result;

/// Notification inbox over the reminder store. Only reminders whose
/// `scheduled_for` has passed are visible.
pub struct Inbox<'a> {
    store: &'a mut Repository<Reminder>,
}

impl<'a> Inbox<'a> {
    pub fn new(store: &'a mut Repository<Reminder>) -> Self {
        Self { store }
    }

    /// Due reminders, most recent due time first.
    pub fn due(&self, now: NaiveDateTime) -> Vec<&Reminder> {
        self.store
            .query()
            .r#where(move |r| r.is_due(now))
            .order_with(|a, b| b.scheduled_for.cmp(&a.scheduled_for))
            .collect()
    }

    pub fn unread_count(&self, now: NaiveDateTime) -> usize {
        self.store
            .query()
            .r#where(move |r| r.is_due(now) && !r.is_read)
            .count()
    }

    pub fn mark_read(&mut self, id: i32) -> Result<&Reminder> {
        let reminder = self.store.get_mut(id)?;
        reminder.is_read = true;
        Ok(reminder)
    }

    /// Marks every unread reminder read, due or not; returns how many changed.
    pub fn mark_all_read(&mut self) -> usize {
        self.store
            .query_mut()
            .r#where(|r| !r.is_read)
            .for_each_mut(|r| r.is_read = true)
    }

    pub fn delete(&mut self, id: i32) -> Result<Reminder> {
        self.store.delete(id)
    }

    pub fn delete_for_booking(&mut self, booking_id: i32) -> usize {
        self.store
            .remove_where(|r| r.booking_id == booking_id)
            .len()
    }
}
