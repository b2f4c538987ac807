//! A lock-free `f64` cell.

use std::sync::atomic::{AtomicU64, Ordering};

/// An `f64` stored as its bit pattern in an [`AtomicU64`].
///
/// Shared writers go through [`fetch_add`](Self::fetch_add), a
/// compare-exchange loop. Holders of `&mut self` use the non-atomic
/// accessors instead.
///
/// All atomic operations are `Relaxed`: cells are independent and the
/// reader of a finished scatter pass always synchronises through the join
/// of the writers (thread scope, rayon pool) before reading.
#[derive(Debug, Default)]
pub struct AtomicF64(AtomicU64);

// Compile-time assertion: shared scatter requires Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<AtomicF64>();
};

impl AtomicF64 {
    /// Create a cell holding `value`.
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    /// Current value.
    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Overwrite the value.
    pub fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Atomically add `amount`, returning the previous value.
    pub fn fetch_add(&self, amount: f64) -> f64 {
        let mut current = self.0.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + amount).to_bits();
            match self
                .0
                .compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(prev) => return f64::from_bits(prev),
                Err(actual) => current = actual,
            }
        }
    }

    /// Current value through an exclusive borrow.
    pub fn get(&mut self) -> f64 {
        f64::from_bits(*self.0.get_mut())
    }

    /// Add `amount` through an exclusive borrow.
    pub fn add_mut(&mut self, amount: f64) {
        let bits = self.0.get_mut();
        *bits = (f64::from_bits(*bits) + amount).to_bits();
    }

    /// Return the value and reset the cell to zero.
    pub fn take(&mut self) -> f64 {
        let bits = self.0.get_mut();
        let value = f64::from_bits(*bits);
        *bits = 0.0f64.to_bits();
        value
    }

    /// Consume the cell.
    pub fn into_inner(self) -> f64 {
        f64::from_bits(self.0.into_inner())
    }
}
