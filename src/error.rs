//! Error types for the points engine.

use crate::points::Points;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur during engine operation.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Point event carried an empty payer name
    #[error("Payer name must not be empty")]
    EmptyPayer,

    /// Spend requested with a zero or negative amount
    #[error("Spend amount must be positive, got {amount}")]
    NonPositiveSpend { amount: Points },

    /// Spend requested more points than are available across all payers
    #[error("Insufficient points: requested {requested}, available {available}")]
    InsufficientPoints {
        requested: Points,
        available: Points,
    },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: points-engine <commands.csv>")]
    MissingArgument,
}
