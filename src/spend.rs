//! Oldest-first spend allocation.
//!
//! The core deduction walk: repeatedly consume the oldest queued event,
//! fully or partially, until the requested total is covered.

use crate::ledger::BalanceLedger;
use crate::points::Points;
use crate::queue::EventQueue;
use log::debug;
use std::collections::BTreeMap;

/// Deducts `request` points from the queue and ledger, oldest events first.
///
/// Returns the net per-payer deltas (always negative), covering only payers
/// actually touched. Each step takes `min(remaining, head)` from the head
/// event: a partial take shrinks the head in place, a full take removes it.
/// The queue holds only positive remainders, so every step makes progress.
///
/// Callers must ensure `request` does not exceed `queue.spendable()`; the
/// facade rejects oversized requests before this walk runs, keeping spends
/// all-or-nothing. The walk itself stops when the queue is drained.
pub fn allocate(
    request: Points,
    queue: &mut EventQueue,
    ledger: &mut BalanceLedger,
) -> BTreeMap<String, Points> {
    let mut remaining = request;
    let mut deltas: BTreeMap<String, Points> = BTreeMap::new();

    while remaining.is_positive() {
        let (payer, available) = match queue.peek_oldest() {
            Some((key, points)) => (key.payer.clone(), points),
            None => break,
        };
        debug_assert!(available.is_positive(), "queue holds only positive remainders");

        let take = remaining.min(available);
        if take == available {
            queue.remove_oldest();
        } else {
            queue.deduct_from_oldest(take);
        }

        ledger.debit(&payer, take);
        *deltas.entry(payer.clone()).or_insert(Points::ZERO) -= take;
        remaining -= take;

        debug!("Deducted {} from {}, {} left to cover", take, payer, remaining);
    }

    deltas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::EventKey;
    use chrono::{TimeZone, Utc};

    fn key(payer: &str, hour: u32) -> EventKey {
        EventKey {
            timestamp: Utc.with_ymd_and_hms(2020, 10, 31, hour, 0, 0).unwrap(),
            payer: payer.to_string(),
        }
    }

    fn earn(queue: &mut EventQueue, ledger: &mut BalanceLedger, payer: &str, hour: u32, points: i64) {
        let points = Points::new(points);
        ledger.credit(payer, points);
        queue.insert(key(payer, hour), points);
    }

    #[test]
    fn test_spend_consumes_oldest_event_entirely() {
        let mut queue = EventQueue::new();
        let mut ledger = BalanceLedger::new();
        earn(&mut queue, &mut ledger, "DANNON", 10, 100);
        earn(&mut queue, &mut ledger, "UNILEVER", 11, 100);

        let deltas = allocate(Points::new(100), &mut queue, &mut ledger);

        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas["DANNON"], Points::new(-100));
        assert_eq!(ledger.balance("DANNON"), Points::ZERO);
        assert_eq!(ledger.balance("UNILEVER"), Points::new(100));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_spend_spills_into_next_oldest() {
        let mut queue = EventQueue::new();
        let mut ledger = BalanceLedger::new();
        earn(&mut queue, &mut ledger, "DANNON", 10, 100);
        earn(&mut queue, &mut ledger, "UNILEVER", 11, 100);
        earn(&mut queue, &mut ledger, "MILLER COORS", 12, 100);

        let deltas = allocate(Points::new(101), &mut queue, &mut ledger);

        assert_eq!(deltas["DANNON"], Points::new(-100));
        assert_eq!(deltas["UNILEVER"], Points::new(-1));
        assert!(!deltas.contains_key("MILLER COORS"));
        assert_eq!(ledger.balance("UNILEVER"), Points::new(99));
    }

    #[test]
    fn test_partial_take_leaves_head_in_place() {
        let mut queue = EventQueue::new();
        let mut ledger = BalanceLedger::new();
        earn(&mut queue, &mut ledger, "DANNON", 10, 300);

        let deltas = allocate(Points::new(120), &mut queue, &mut ledger);

        assert_eq!(deltas["DANNON"], Points::new(-120));
        let (oldest, points) = queue.peek_oldest().unwrap();
        assert_eq!(oldest.payer, "DANNON");
        assert_eq!(points, Points::new(180));
        assert_eq!(ledger.balance("DANNON"), Points::new(180));
    }

    #[test]
    fn test_deltas_accumulate_across_events_of_same_payer() {
        let mut queue = EventQueue::new();
        let mut ledger = BalanceLedger::new();
        earn(&mut queue, &mut ledger, "DANNON", 10, 100);
        earn(&mut queue, &mut ledger, "UNILEVER", 11, 50);
        earn(&mut queue, &mut ledger, "DANNON", 12, 100);

        let deltas = allocate(Points::new(250), &mut queue, &mut ledger);

        assert_eq!(deltas["DANNON"], Points::new(-200));
        assert_eq!(deltas["UNILEVER"], Points::new(-50));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_spend_conservation() {
        let mut queue = EventQueue::new();
        let mut ledger = BalanceLedger::new();
        earn(&mut queue, &mut ledger, "DANNON", 10, 300);
        earn(&mut queue, &mut ledger, "UNILEVER", 11, 200);
        earn(&mut queue, &mut ledger, "MILLER COORS", 14, 10000);

        let before = ledger.snapshot();
        let request = Points::new(5000);
        let deltas = allocate(request, &mut queue, &mut ledger);

        let total: Points = deltas
            .values()
            .fold(Points::ZERO, |acc, delta| acc + *delta);
        assert_eq!(total, -request);

        for (payer, delta) in &deltas {
            assert_eq!(ledger.balance(payer), before[payer] + *delta);
        }
    }

    #[test]
    fn test_walk_stops_when_queue_drains() {
        let mut queue = EventQueue::new();
        let mut ledger = BalanceLedger::new();
        earn(&mut queue, &mut ledger, "DANNON", 10, 100);

        let deltas = allocate(Points::new(500), &mut queue, &mut ledger);

        assert_eq!(deltas["DANNON"], Points::new(-100));
        assert!(queue.is_empty());
        assert_eq!(ledger.balance("DANNON"), Points::ZERO);
    }
}
