//! Bounded history of accepted price observations.
//!
//! Entries are kept in acceptance order, which the monotonicity gate makes
//! identical to timestamp order. When an append would exceed the capacity,
//! the oldest entry is evicted first, so the bound holds at every point.

use std::collections::VecDeque;

use qoracle_types::PriceObservation;

/// FIFO store of accepted observations with a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceHistoryStore {
    entries: VecDeque<PriceObservation>,
    max_history: usize,
}

impl PriceHistoryStore {
    /// Create an empty store holding at most `max_history` entries.
    ///
    /// A capacity of zero is raised to one; the committee config rejects it
    /// before it gets here.
    pub fn new(max_history: usize) -> Self {
        let max_history = max_history.max(1);
        Self {
            entries: VecDeque::with_capacity(max_history.min(4096)),
            max_history,
        }
    }

    /// Record `observation` as the newest entry, evicting the oldest one if
    /// the store is full. Returns the evicted entry, if any.
    pub(crate) fn append(&mut self, observation: PriceObservation) -> Option<PriceObservation> {
        let evicted = if self.entries.len() >= self.max_history {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(observation);
        evicted
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PriceObservation> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Copy of the entries from oldest to newest.
    pub fn to_vec(&self) -> Vec<PriceObservation> {
        self.entries.iter().copied().collect()
    }

    /// Oldest retained entry.
    pub fn oldest(&self) -> Option<&PriceObservation> {
        self.entries.front()
    }

    /// Most recently accepted entry.
    pub fn newest(&self) -> Option<&PriceObservation> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }
}
