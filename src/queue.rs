//! Ordered queue of outstanding spend-eligible point events.
//!
//! Events are keyed by `(timestamp, payer)` so the oldest points are always
//! at the front, with payer name as a deterministic tie-break. Only the
//! remaining point count of an entry is mutable; the ordering key never
//! changes after insertion.

use crate::points::Points;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Composite ordering key for queued events.
///
/// Derived `Ord` compares timestamp first, then payer name, which gives the
/// oldest-first walk its deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EventKey {
    /// When the points were earned
    pub timestamp: DateTime<Utc>,

    /// Payer that issued the points
    pub payer: String,
}

/// Min-ordered queue of outstanding point events.
///
/// Holds only spend-eligible events: every stored remainder is strictly
/// positive. Two events with an identical `(timestamp, payer)` key merge
/// into one entry, which is indistinguishable under the oldest-first walk.
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Remaining points per event, ordered oldest-first.
    entries: BTreeMap<EventKey, Points>,

    /// Running sum of all remainders.
    spendable: Points,
}

impl EventQueue {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        EventQueue {
            entries: BTreeMap::new(),
            spendable: Points::ZERO,
        }
    }

    /// Inserts an event with the given remaining points.
    ///
    /// Callers must only insert positive amounts; non-positive events are
    /// not spend-eligible and are filtered out before they reach the queue.
    pub fn insert(&mut self, key: EventKey, points: Points) {
        debug_assert!(points.is_positive(), "queued events must hold positive points");

        *self.entries.entry(key).or_insert(Points::ZERO) += points;
        self.spendable += points;
    }

    /// Returns the oldest event without removing it.
    pub fn peek_oldest(&self) -> Option<(&EventKey, Points)> {
        self.entries
            .first_key_value()
            .map(|(key, points)| (key, *points))
    }

    /// Removes and returns the oldest event.
    pub fn remove_oldest(&mut self) -> Option<(EventKey, Points)> {
        let (key, points) = self.entries.pop_first()?;
        self.spendable -= points;
        Some((key, points))
    }

    /// Reduces the oldest event's remainder in place.
    ///
    /// `amount` must not exceed the head's remaining points. The entry is
    /// dropped once its remainder reaches zero.
    pub fn deduct_from_oldest(&mut self, amount: Points) {
        if let Some(mut entry) = self.entries.first_entry() {
            debug_assert!(amount.is_positive());
            debug_assert!(amount <= *entry.get());

            *entry.get_mut() -= amount;
            self.spendable -= amount;
            if entry.get().is_zero() {
                entry.remove();
            }
        }
    }

    /// Total points remaining across all queued events.
    pub fn spendable(&self) -> Points {
        self.spendable
    }

    /// Returns `true` if no events are queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
