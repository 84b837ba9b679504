//! # gridcalc
//!
//! A spreadsheet cell model, formula engine, and recalculation library.
//!
//! A [`Sheet`] holds a sparse grid of cells. Entering input that starts
//! with `=` stores a formula; every edit triggers one recalculation sweep
//! over the formula cells in insertion order. Formulas support the four
//! arithmetic operators, parentheses, cell references like `B2`, and the
//! range aggregates `SUM`, `AVG`, `MIN`, `MAX`, and `COUNT`. Anything that
//! fails to evaluate shows `#ERROR` while keeping the raw input.
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut sheet = Sheet::new();
//! sheet.set_cell("A1", "10").unwrap();
//! sheet.set_cell("A2", "32").unwrap();
//! sheet.set_cell("A3", "=SUM(A1:A2)").unwrap();
//!
//! assert_eq!(sheet.display_value("A3"), "42");
//!
//! // Formats change the display, never the stored value
//! sheet.set_format("A3", CellFormat::Currency).unwrap();
//! assert_eq!(sheet.display_value("A3"), "$42.00");
//! assert_eq!(sheet.raw_value("A3"), CellValue::Number(42.0));
//!
//! // Round-trip through the JSON snapshot
//! let json = sheet.to_json().unwrap();
//! let restored = Sheet::from_json(&json).unwrap();
//! assert_eq!(restored.display_value("A3"), "$42.00");
//! ```

pub mod error;
pub mod export;
pub mod prelude;
pub mod sheet;
pub mod snapshot;

pub use error::{SheetError, SheetResult};
pub use export::{DelimitedWriter, ExportOptions};
pub use sheet::Sheet;
pub use snapshot::{CellRecord, RawValue, SheetSnapshot};

// Re-export core types
pub use gridcalc_core::{
    format_value, Cell, CellAddress, CellFormat, CellRange, CellValue, Grid, Locale, DEFAULT_COLS,
    DEFAULT_ROWS, ERROR_MARKER, FORMULA_MARKER, MAX_COLS, MAX_ROWS,
};

// Re-export formula types
pub use gridcalc_formula::{
    aggregate, evaluate, parse_expr, selection_stats, AggregateKind, FormulaError, FormulaResult,
    SelectionStats,
};
