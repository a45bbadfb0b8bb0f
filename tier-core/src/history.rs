//! Bounded history of recent income observations.

use std::collections::VecDeque;

use rust_decimal::Decimal;

use crate::models::Observation;

/// Number of observations kept by [`IncomeHistory::new`].
pub const HISTORY_CAPACITY: usize = 100;

/// Fixed-capacity FIFO of observations in chronological order.
///
/// Appending past the capacity evicts the oldest entry, so the buffer always
/// holds the most recent `capacity` observations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeHistory {
    entries: VecDeque<Observation>,
    capacity: usize,
}

impl Default for IncomeHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl IncomeHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(HISTORY_CAPACITY)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends `observation`, evicting from the front when over capacity.
    pub fn append(
        &mut self,
        observation: Observation,
    ) {
        self.entries.push_back(observation);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Observations oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.entries.iter()
    }

    /// The most recently appended observation still held.
    pub fn latest(&self) -> Option<&Observation> {
        self.entries.back()
    }

    /// Copies the observations sorted by headcount, ascending.
    ///
    /// The sort is stable: equal headcounts keep their chronological order.
    pub fn snapshot_sorted_by_headcount(&self) -> Vec<Observation> {
        let mut sorted: Vec<Observation> = self.entries.iter().copied().collect();
        sorted.sort_by_key(|o| o.headcount);
        sorted
    }

    pub(crate) fn headcount_bounds(&self) -> Option<(Decimal, Decimal)> {
        let mut iter = self.entries.iter().map(|o| o.headcount);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), h| (lo.min(h), hi.max(h))))
    }

    pub(crate) fn min_income(&self) -> Option<Decimal> {
        self.entries.iter().map(|o| o.income).min()
    }
}

impl<'a> IntoIterator for &'a IncomeHistory {
    type Item = &'a Observation;
    type IntoIter = std::collections::vec_deque::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
