//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while evaluating a formula
///
/// Every variant collapses to the error marker at the cell level; the
/// distinction exists for diagnostics and tests.
#[derive(Debug, Error)]
pub enum FormulaError {
    /// Arithmetic parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Division or overflow produced a non-finite result
    #[error("Non-finite arithmetic result")]
    NonFinite,
}
