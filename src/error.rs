//! Error types for the payoff engine
//!
//! Only caller data problems are surfaced as errors. Financial "failure"
//! states the caller needs to render — a debt that never amortizes, a ratio
//! with no defined denominator — are ordinary values (`Months::Never`,
//! `Ratio::Unavailable`, `converged: false`), never `Err`.

use thiserror::Error;

/// Errors surfaced by the engine. All variants indicate bad input data;
/// nothing in this crate is retried.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A debt carried a negative balance.
    #[error("debt '{id}': balance {balance} is negative")]
    NegativeBalance { id: String, balance: f64 },

    /// A debt carried a negative minimum or extra payment.
    #[error("debt '{id}': {field} {amount} is negative")]
    NegativePayment {
        id: String,
        field: &'static str,
        amount: f64,
    },

    /// A debt carried a negative annual interest rate.
    #[error("debt '{id}': annual rate {rate}% is negative")]
    NegativeRate { id: String, rate: f64 },

    /// A monetary or rate field was NaN or infinite.
    #[error("debt '{id}': {field} is not a finite number")]
    NonFiniteAmount { id: String, field: &'static str },

    /// A required field was missing from an input record.
    #[error("debt '{id}': missing required field '{field}'")]
    MissingField { id: String, field: &'static str },

    /// An input record named a debt kind the engine does not know.
    #[error("debt '{id}': unknown debt kind '{kind}'")]
    UnknownKind { id: String, kind: String },

    /// A simulation was requested over an empty debt set.
    #[error("cannot simulate an empty debt portfolio")]
    EmptyPortfolio,

    /// Snapshot file could not be read.
    #[error("failed to read debt snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file could not be parsed.
    #[error("failed to parse debt snapshot: {0}")]
    Csv(#[from] csv::Error),
}
