//! Facade error types

use thiserror::Error;

/// Result type for sheet operations
pub type SheetResult<T> = std::result::Result<T, SheetError>;

/// Errors that can occur at the sheet level
#[derive(Debug, Error)]
pub enum SheetError {
    /// Invalid address or range input
    #[error("address error: {0}")]
    Address(#[from] gridcalc_core::Error),

    /// Snapshot serialization or deserialization failure
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Delimited export failure
    #[error("export error: {0}")]
    Export(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
