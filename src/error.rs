//! Error types for milan-reg.

use thiserror::Error;

/// Registration evaluation and schedule-search error type.
#[derive(Error, Debug)]
pub enum RegError {
    /// Every schedule candidate was pruned or non-competitive; there is no
    /// best schedule to report.
    #[error("no valid schedule: {0}")]
    NoValidSchedule(String),

    /// A registration was queried while its inputs were inconsistent
    /// (mismatched shapes, empty point sets, non-positive temperature).
    #[error("invalid registration state: {0}")]
    InvalidState(String),

    /// The external fitting routine failed for one schedule candidate.
    #[error("provider failure: {0}")]
    Provider(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RegError>;
