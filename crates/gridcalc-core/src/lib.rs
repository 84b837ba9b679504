//! # gridcalc-core
//!
//! Core data structures for the gridcalc spreadsheet engine.
//!
//! This crate provides the fundamental types used throughout gridcalc:
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and rectangular ranges
//! - [`CellValue`] and [`Cell`] - Stored cell records (text, numbers, errors)
//! - [`CellFormat`] and [`Locale`] - Presentational number formatting
//! - [`Grid`] - The sparse, insertion-ordered cell store plus grid dimensions
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{CellAddress, Grid};
//!
//! let addr = CellAddress::parse("B12").unwrap();
//! assert_eq!((addr.row, addr.col), (11, 1));
//! assert_eq!(addr.to_label(), "B12");
//!
//! let grid = Grid::new();
//! assert!(grid.get("B12").is_none()); // absent entries are empty cells
//! ```

pub mod address;
pub mod cell;
pub mod error;
pub mod format;
pub mod grid;

// Re-exports for convenience
pub use address::{CellAddress, CellRange};
pub use cell::{Cell, CellValue};
pub use error::{Error, Result};
pub use format::{format_value, CellFormat, Locale};
pub use grid::Grid;

/// Maximum number of rows in a grid
pub const MAX_ROWS: u32 = 65_536;

/// Maximum number of columns in a grid
pub const MAX_COLS: u16 = 256;

/// Minimum number of rows in a grid
pub const MIN_ROWS: u32 = 1;

/// Minimum number of columns in a grid
pub const MIN_COLS: u16 = 1;

/// Row count of a freshly created grid
pub const DEFAULT_ROWS: u32 = 100;

/// Column count of a freshly created grid
pub const DEFAULT_COLS: u16 = 26;

/// Leading character that marks a cell input as a formula
pub const FORMULA_MARKER: char = '=';

/// Display rendering of a failed formula evaluation
pub const ERROR_MARKER: &str = "#ERROR";
