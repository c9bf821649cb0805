//! Persistent badge state and its reconciliation against the config schema.
//!
//! [`BadgeState`] is the only mutable data on the badge: the selected page
//! and the tally counters. It is serialized as
//! `{"page": <int>, "counters": {"<key>": <int>, ...}}` with counters kept in
//! insertion order, so files written by the badge stay stable across saves.

mod counters;
pub mod store;

pub use counters::Counters;
pub use store::{PersistError, StateStore};

use serde::{Deserialize, Serialize};

use crate::config::CounterSpec;

/// Mutable, persisted state for one profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeState {
    /// Index into the configured page list.
    pub page: usize,
    /// Tally per counter key. Keys no longer configured are kept.
    pub counters: Counters,
}

impl BadgeState {
    /// Repair a loaded state so it matches the current config schema.
    ///
    /// Every configured counter key gets an entry (zero when missing) and the
    /// page index is clamped below `page_count`. Keys from older configs are
    /// left untouched. Running this twice yields the same state.
    pub fn reconcile(&mut self, counters: &[CounterSpec], page_count: usize) {
        for counter in counters {
            self.counters.ensure(&counter.key);
        }

        if self.page >= page_count {
            self.page = page_count.saturating_sub(1);
        }
    }

    /// Count for `key`, treating an absent key as zero.
    pub fn count(&self, key: &str) -> u64 {
        self.counters.get(key).unwrap_or(0)
    }

    /// Increment a counter, saturating at `u64::MAX`.
    ///
    /// Returns the new value.
    pub fn increment(&mut self, key: &str) -> u64 {
        let value = self.count(key).saturating_add(1);
        self.counters.set(key, value);
        value
    }

    /// Advance to the next page, wrapping to the first.
    pub fn next_page(&mut self, page_count: usize) {
        if page_count == 0 {
            return;
        }
        self.page = (self.page + 1) % page_count;
    }

    /// Go back one page, wrapping to the last.
    pub fn previous_page(&mut self, page_count: usize) {
        if page_count == 0 {
            return;
        }
        self.page = if self.page == 0 || self.page >= page_count {
            page_count - 1
        } else {
            self.page - 1
        };
    }
}
