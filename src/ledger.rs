//! Per-payer balance bookkeeping.
//!
//! Maintains the invariant: a payer's balance equals the sum of all recorded
//! points minus the sum of all points the spend walk has deducted.

use crate::points::Points;
use std::collections::{BTreeMap, HashMap};

/// Running point balances, one per payer.
///
/// # Negative Balances
///
/// `credit` applies signed amounts without bound checks: a correction event
/// may legitimately push a balance negative. Only the spend path enforces
/// non-negativity, by never deducting more than a queued event still holds.
#[derive(Debug, Default)]
pub struct BalanceLedger {
    /// Balances indexed by payer name.
    balances: HashMap<String, Points>,
}

impl BalanceLedger {
    /// Creates a new empty ledger.
    pub fn new() -> Self {
        BalanceLedger {
            balances: HashMap::new(),
        }
    }

    /// Adds `amount` (possibly negative) to a payer's balance.
    ///
    /// The payer's entry is created at zero on first touch.
    pub fn credit(&mut self, payer: &str, amount: Points) {
        *self
            .balances
            .entry(payer.to_string())
            .or_insert(Points::ZERO) += amount;
    }

    /// Removes `amount` from a payer's balance.
    ///
    /// Used exclusively by the spend walk, which guarantees the payer exists
    /// and holds at least `amount` in queued events.
    pub fn debit(&mut self, payer: &str, amount: Points) {
        self.credit(payer, -amount);
    }

    /// Returns a payer's current balance, zero if never recorded.
    pub fn balance(&self, payer: &str) -> Points {
        self.balances.get(payer).copied().unwrap_or(Points::ZERO)
    }

    /// Returns an ordered copy of all payer balances.
    ///
    /// Keys are sorted so repeated reads and serialized output are
    /// reproducible.
    pub fn snapshot(&self) -> BTreeMap<String, Points> {
        self.balances
            .iter()
            .map(|(payer, points)| (payer.clone(), *points))
            .collect()
    }

    /// Number of known payers.
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Returns `true` if no payer has been recorded.
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = BalanceLedger::new();
        assert!(ledger.is_empty());
        assert!(ledger.snapshot().is_empty());
    }

    #[test]
    fn test_credit_creates_entry_at_zero_then_adds() {
        let mut ledger = BalanceLedger::new();
        ledger.credit("DANNON", Points::new(300));

        assert_eq!(ledger.balance("DANNON"), Points::new(300));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_credit_accumulates() {
        let mut ledger = BalanceLedger::new();
        ledger.credit("DANNON", Points::new(300));
        ledger.credit("DANNON", Points::new(1000));

        assert_eq!(ledger.balance("DANNON"), Points::new(1300));
    }

    #[test]
    fn test_negative_credit_may_go_below_zero() {
        let mut ledger = BalanceLedger::new();
        ledger.credit("DANNON", Points::new(100));
        ledger.credit("DANNON", Points::new(-300));

        assert_eq!(ledger.balance("DANNON"), Points::new(-200));
    }

    #[test]
    fn test_debit_inverts_sign() {
        let mut ledger = BalanceLedger::new();
        ledger.credit("DANNON", Points::new(300));
        ledger.debit("DANNON", Points::new(200));

        assert_eq!(ledger.balance("DANNON"), Points::new(100));
    }

    #[test]
    fn test_unknown_payer_reads_as_zero() {
        let ledger = BalanceLedger::new();
        assert_eq!(ledger.balance("NOBODY"), Points::ZERO);
    }

    #[test]
    fn test_snapshot_is_sorted_and_detached() {
        let mut ledger = BalanceLedger::new();
        ledger.credit("UNILEVER", Points::new(200));
        ledger.credit("DANNON", Points::new(300));
        ledger.credit("MILLER COORS", Points::new(10000));

        let snap = ledger.snapshot();
        let payers: Vec<&String> = snap.keys().collect();
        assert_eq!(payers, ["DANNON", "MILLER COORS", "UNILEVER"]);

        // Mutating the ledger afterwards must not affect the snapshot.
        ledger.credit("DANNON", Points::new(1));
        assert_eq!(snap["DANNON"], Points::new(300));
    }
}
