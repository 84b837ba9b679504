//! # gridcalc-formula
//!
//! Formula evaluation and range aggregation for gridcalc.
//!
//! A formula reduces to a number (or the error marker) in a fixed pass
//! order: the text is uppercased, recognized aggregate calls
//! (`SUM(A1:B2)` etc.) are substituted with their numeric results, remaining
//! bare cell references are substituted with their numeric values, and the
//! residue is evaluated as plain arithmetic by a dedicated
//! recursive-descent parser. The parser accepts only numeric literals,
//! `+ - * /`, and parentheses, so formula text can never execute anything.
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{Cell, CellAddress, CellValue, Grid};
//! use gridcalc_formula::evaluate;
//!
//! let mut grid = Grid::new();
//! grid.set("A1".into(), Cell::text("2"));
//! grid.set("A2".into(), Cell::text("3"));
//!
//! let target = CellAddress::parse("A3").unwrap();
//! assert_eq!(evaluate(&grid, &target, "SUM(A1:A2)*2"), CellValue::Number(10.0));
//! ```

pub mod aggregate;
pub mod ast;
pub mod error;
pub mod eval;
pub mod parser;
pub mod substitute;

// Re-exports for convenience
pub use aggregate::{aggregate, selection_stats, AggregateKind, SelectionStats};
pub use ast::{BinaryOperator, Expr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use eval::{evaluate, try_evaluate};
pub use parser::parse_expr;
