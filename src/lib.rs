//! # Points Engine
//!
//! A loyalty-points ledger that tracks point-earning events across multiple
//! issuing partners and spends points oldest-first, never driving any single
//! payer's balance negative through a spend.
//!
//! ## Design Principles
//!
//! - **Whole-point arithmetic**: Signed 64-bit integer points
//! - **Oldest-first spending**: Events drained in `(timestamp, payer)` order
//! - **Atomic spends**: A request exceeding the spendable pool fails whole
//! - **Deterministic output**: Balances keyed in sorted payer order
//!
//! ## Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use points_engine::{PointEvent, Points, PointsEngine};
//!
//! let mut engine = PointsEngine::new();
//! engine.record(PointEvent {
//!     payer: "DANNON".to_string(),
//!     points: Points::new(300),
//!     timestamp: Utc.with_ymd_and_hms(2020, 10, 31, 10, 0, 0).unwrap(),
//! }).unwrap();
//!
//! let deltas = engine.spend(Points::new(100)).unwrap();
//! assert_eq!(deltas["DANNON"], Points::new(-100));
//! assert_eq!(engine.balance_of("DANNON"), Points::new(200));
//! ```

pub mod engine;
pub mod error;
pub mod event;
pub mod ledger;
pub mod points;
pub mod queue;
pub mod spend;

pub use engine::PointsEngine;
pub use error::{LedgerError, Result};
pub use event::{Command, CommandRecord, PointEvent};
pub use ledger::BalanceLedger;
pub use points::Points;
pub use queue::{EventKey, EventQueue};
