use serde::{Deserialize, Serialize};

use crate::utils::constants::DEFAULT_HISTORY_CAPACITY;

/// Fixed-capacity ring of samples.
///
/// Every slot is pre-filled with a neutral value, so `last` and `from_tail`
/// are defined from the first tick on, even for lookbacks beyond `size()`.
/// Lookbacks are taken modulo the capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircularBuffer<T> {
    slots: Vec<T>,
    /// Index of the slot the next `put` writes.
    head: usize,
    puts: usize,
}

impl<T: Copy> CircularBuffer<T> {
    /// Creates a buffer with every slot set to `neutral`. A zero capacity is
    /// raised to one.
    pub fn new(capacity: usize, neutral: T) -> Self {
        Self {
            slots: vec![neutral; capacity.max(1)],
            head: 0,
            puts: 0,
        }
    }

    /// Overwrites the oldest slot.
    pub fn put(&mut self, value: T) {
        self.slots[self.head] = value;
        self.head = (self.head + 1) % self.slots.len();
        self.puts = self.puts.saturating_add(1);
    }

    /// Most recently put value.
    pub fn last(&self) -> T {
        self.from_tail(0)
    }

    /// Value put `k` puts before the most recent one.
    pub fn from_tail(&self, k: usize) -> T {
        let capacity = self.slots.len();
        let back = k % capacity;
        self.slots[(self.head + capacity - 1 - back) % capacity]
    }

    /// Number of puts since construction, capped at the capacity.
    pub fn size(&self) -> usize {
        self.puts.min(self.slots.len())
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Refills every slot with `neutral` and forgets the put count.
    pub fn reset(&mut self, neutral: T) {
        self.slots.iter_mut().for_each(|slot| *slot = neutral);
        self.head = 0;
        self.puts = 0;
    }
}

impl<T: Copy + Default> Default for CircularBuffer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY, T::default())
    }
}

/// Scalar signal history used for every per-axis sample stream.
pub type SampleHistory = CircularBuffer<f64>;
