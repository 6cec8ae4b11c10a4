
use chrono::NaiveDateTime;

use crate::core::models::{Booking, HousekeepingTask};
use crate::core::repository::{Repository, Sort};
use crate::errors::Result;

/// Uncleaned task for the booking's property.
pub fn plan_for_booking(booking: &Booking) -> HousekeepingTask {
    HousekeepingTask::for_booking(booking)
}

/// Cleaning board over the housekeeping store.
pub struct Housekeeping<'a> {
    store: &'a mut Repository<HousekeepingTask>,
}

impl<'a> Housekeeping<'a> {
    pub fn new(store: &'a mut Repository<HousekeepingTask>) -> Self {
        Self { store }
    }

    pub fn open_for_booking(&mut self, booking: &Booking) -> i32 {
        self.store.insert(plan_for_booking(booking))
    }

    /// Tasks for a property, newest first.
    pub fn for_property(&self, property_id: i32) -> Vec<&HousekeepingTask> {
        self.store
            .query()
            .r#where(move |t| t.property_id == property_id)
            .order_with(|a, b| b.id.cmp(&a.id))
            .collect()
    }

    /// Tasks not yet verified by the owner, oldest first.
    pub fn pending(&self) -> Vec<&HousekeepingTask> {
        self.store
            .query()
            .r#where(|t| !t.verified_by_owner)
            .order(Sort::IdAsc)
            .collect()
    }

    pub fn mark_clean(
        &mut self,
        id: i32,
        cleaned_by: i32,
        at: NaiveDateTime,
    ) -> Result<&HousekeepingTask> {
        let task = self.store.get_mut(id)?;
        task.mark_clean(cleaned_by, at);
        Ok(task)
    }

    pub fn mark_dirty(&mut self, id: i32) -> Result<&HousekeepingTask> {
        let task = self.store.get_mut(id)?;
        task.mark_dirty();
        Ok(task)
    }

    pub fn verify(&mut self, id: i32) -> Result<&HousekeepingTask> {
        let task = self.store.get_mut(id)?;
        task.verify()?;
        Ok(task)
    }

    pub fn delete_for_booking(&mut self, booking_id: i32) -> usize {
        self.store
            .remove_where(|t| t.booking_id == booking_id)
            .len()
    }
}
