//! Core loyalty points engine.
//!
//! Owns the event queue and the balance ledger and exposes the three ledger
//! operations: record a point-earning event, spend a point total, and read
//! balances. Also drives streaming CSV command processing for the CLI.

use crate::error::{LedgerError, Result};
use crate::event::{Command, CommandRecord, PointEvent};
use crate::ledger::BalanceLedger;
use crate::points::Points;
use crate::queue::{EventKey, EventQueue};
use crate::spend;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// The loyalty points engine.
///
/// Maintains one event queue and one balance ledger; no other component
/// touches their internals. Spends deduct oldest points first and are
/// all-or-nothing: a request larger than the spendable pool fails without
/// mutating any state.
///
/// # Concurrency
///
/// Not internally synchronized. `spend` is a multi-step read-modify-write
/// across both structures, so a concurrent host must serialize all three
/// operations behind a single lock around the engine.
pub struct PointsEngine {
    /// Outstanding spend-eligible events, oldest first.
    queue: EventQueue,

    /// Running balances per payer.
    ledger: BalanceLedger,
}

impl PointsEngine {
    /// Creates a new empty engine.
    pub fn new() -> Self {
        PointsEngine {
            queue: EventQueue::new(),
            ledger: BalanceLedger::new(),
        }
    }

    /// Records a point-earning event.
    ///
    /// Credits the payer's balance. Only events with strictly positive
    /// points enter the queue; zero and negative events (corrections) are
    /// not spend-eligible.
    pub fn record(&mut self, event: PointEvent) -> Result<()> {
        if event.payer.trim().is_empty() {
            return Err(LedgerError::EmptyPayer);
        }

        self.ledger.credit(&event.payer, event.points);
        if event.points.is_positive() {
            self.queue.insert(
                EventKey {
                    timestamp: event.timestamp,
                    payer: event.payer,
                },
                event.points,
            );
        }

        Ok(())
    }

    /// Spends `amount` points, oldest events first.
    ///
    /// Returns the net per-payer deltas (all negative), covering only payers
    /// actually touched. Fails without mutating state when `amount` is not
    /// positive or exceeds the total spendable pool.
    pub fn spend(&mut self, amount: Points) -> Result<BTreeMap<String, Points>> {
        if !amount.is_positive() {
            return Err(LedgerError::NonPositiveSpend { amount });
        }

        let available = self.queue.spendable();
        if amount > available {
            return Err(LedgerError::InsufficientPoints {
                requested: amount,
                available,
            });
        }

        Ok(spend::allocate(amount, &mut self.queue, &mut self.ledger))
    }

    /// Returns the current balance of every known payer, keyed in sorted
    /// order.
    pub fn balances(&self) -> BTreeMap<String, Points> {
        self.ledger.snapshot()
    }

    /// Returns one payer's balance, zero if the payer was never recorded.
    pub fn balance_of(&self, payer: &str) -> Points {
        self.ledger.balance(payer)
    }

    /// Total points currently available to spend across all payers.
    pub fn spendable(&self) -> Points {
        self.queue.spendable()
    }

    /// Processes commands from a CSV reader in streaming fashion.
    ///
    /// Records are read one at a time to minimize memory usage. Invalid or
    /// rejected rows are logged at warn level and skipped; a skipped row
    /// mutates nothing.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<CommandRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => {
                    if let Some(command) = record.parse() {
                        if let Err(e) = self.apply(command, row_num) {
                            warn!("Row {}: {}", row_num, e);
                        }
                    } else {
                        warn!("Row {}: Failed to parse command record", row_num);
                    }
                }
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                }
            }
        }

        Ok(())
    }

    /// Applies a single parsed command.
    fn apply(&mut self, command: Command, row: usize) -> Result<()> {
        match command {
            Command::Earn(event) => {
                let payer = event.payer.clone();
                let points = event.points;
                self.record(event)?;
                debug!("Row {}: Recorded {} points for {}", row, points, payer);
            }
            Command::Spend(amount) => {
                let deltas = self.spend(amount)?;
                debug!(
                    "Row {}: Spent {} across {} payer(s)",
                    row,
                    amount,
                    deltas.len()
                );
            }
        }

        Ok(())
    }

    /// Writes final payer balances as a JSON object.
    ///
    /// Keys are sorted by payer name for deterministic, reproducible output.
    pub fn write_balances<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, &self.ledger.snapshot())?;
        writeln!(writer)?;
        Ok(())
    }
}

impl Default for PointsEngine {
    fn default() -> Self {
        Self::new()
    }
}
