//! Free-list pool for records that own heap buffers.
//!
//! Records are moved in and out by value. Releasing a record calls
//! [`Recycle::recycle`] so the next acquirer sees a clean record, while the
//! record keeps whatever buffers it grew. The pool never shrinks on its own.

use crate::profiling::profile_function;

/// Reset hook run when a record goes back into a [`Pool`].
pub trait Recycle {
    /// Clear logical state. Heap buffers should be kept.
    fn recycle(&mut self);
}

#[derive(Debug)]
pub struct Pool<T> {
    free: Vec<T>,
    created: usize,
    high_water: usize,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub const fn new() -> Self {
        Self {
            free: Vec::new(),
            created: 0,
            high_water: 0,
        }
    }

    /// Take a free record, or build one with `create` when the pool is empty.
    pub fn acquire_with(&mut self, create: impl FnOnce() -> T) -> T {
        profile_function!();
        match self.free.pop() {
            Some(record) => record,
            None => {
                self.created += 1;
                tracing::trace!("Pool empty, creating record #{}", self.created);
                create()
            }
        }
    }

    /// Take a free record matching `pred`, falling back to any free record.
    pub fn acquire_matching(
        &mut self,
        pred: impl Fn(&T) -> bool,
        create: impl FnOnce() -> T,
    ) -> T {
        if let Some(idx) = self.free.iter().rposition(pred) {
            return self.free.swap_remove(idx);
        }
        self.acquire_with(create)
    }

    /// Number of records waiting in the free list.
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Total number of records this pool ever had to create.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Largest number of records the free list held at once.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

impl<T: Recycle> Pool<T> {
    pub fn release(&mut self, mut record: T) {
        record.recycle();
        self.free.push(record);
        self.high_water = self.high_water.max(self.free.len());
    }
}
