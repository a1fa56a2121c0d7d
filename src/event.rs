//! Command models for CSV parsing and internal representation.

use crate::points::Points;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;

/// Timestamp format accepted on the wire: `YYYY-MM-DDTHH:MM:SSZ`, UTC.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Raw command record as read from CSV.
///
/// Uses string-based parsing for flexibility and handles the optional fields
/// which are only present for some operations (a spend carries no payer or
/// timestamp).
#[derive(Debug, Deserialize)]
pub struct CommandRecord {
    /// Operation: earn, spend
    pub op: String,

    /// Payer name (present for earn)
    pub payer: Option<String>,

    /// Point amount as a decimal integer string
    pub points: Option<String>,

    /// Event timestamp (present for earn)
    pub timestamp: Option<String>,
}

impl CommandRecord {
    /// Parses the raw CSV record into a typed command.
    ///
    /// Payer names are case-normalized to uppercase here, at the
    /// caller-facing layer. Returns `None` if the record is invalid
    /// (unknown op, missing or malformed field).
    pub fn parse(&self) -> Option<Command> {
        let op = self.op.trim().to_lowercase();

        match op.as_str() {
            "earn" => {
                let payer = self.parse_payer()?;
                let points = self.parse_points()?;
                let timestamp = self.parse_timestamp()?;
                Some(Command::Earn(PointEvent {
                    payer,
                    points,
                    timestamp,
                }))
            }
            "spend" => {
                let points = self.parse_points()?;
                Some(Command::Spend(points))
            }
            _ => None,
        }
    }

    /// Parses and uppercases the payer field; rejects empty names.
    fn parse_payer(&self) -> Option<String> {
        let payer = self.payer.as_ref()?.trim();
        if payer.is_empty() {
            return None;
        }
        Some(payer.to_uppercase())
    }

    /// Parses the points field into a `Points` amount.
    fn parse_points(&self) -> Option<Points> {
        let points_str = self.points.as_ref()?;
        let trimmed = points_str.trim();
        if trimmed.is_empty() {
            return None;
        }
        Points::from_str(trimmed).ok()
    }

    /// Parses the timestamp field, accepting only the strict UTC format.
    fn parse_timestamp(&self) -> Option<DateTime<Utc>> {
        let ts = self.timestamp.as_ref()?.trim();
        NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// A parsed and validated command ready for processing.
#[derive(Debug, Clone)]
pub enum Command {
    /// Record a point-earning event (points may be negative for corrections).
    Earn(PointEvent),

    /// Deduct a point total across payers, oldest points first.
    Spend(Points),
}

/// An immutable record of points earned by one payer at one time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointEvent {
    /// Payer that issued the points (uppercase, non-empty)
    pub payer: String,

    /// Points granted; negative for corrections
    pub points: Points,

    /// When the points were earned, second resolution
    pub timestamp: DateTime<Utc>,
}
