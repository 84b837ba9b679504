//! Cell records and stored values

use crate::format::CellFormat;
use crate::{ERROR_MARKER, FORMULA_MARKER};
use std::fmt;

/// The scalar stored in a cell
///
/// Text entries keep the user's input verbatim; they are never coerced to
/// numbers at storage time. Coercion happens only on demand, through
/// [`CellValue::as_number`], when evaluation or aggregation needs a number.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Literal text, exactly as entered
    Text(String),
    /// Numeric result of a formula evaluation
    Number(f64),
    /// A failed formula evaluation, rendered as `#ERROR`
    Error,
}

impl CellValue {
    /// The value of an empty cell (empty text)
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    /// Check if this is the empty value
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }

    /// Check if this is the error marker
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error)
    }

    /// Numeric view of the value, if it has one
    ///
    /// Text parses on demand (single decimal-point convention); non-finite
    /// parses and the error marker have no numeric view.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            CellValue::Error => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::empty()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Error => write!(f, "{}", ERROR_MARKER),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// A stored cell record
///
/// Only non-empty cells are stored; an absent record reads as an empty cell
/// with no formula and the default format.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    /// The original `=`-prefixed input, present iff the cell holds a formula
    pub formula: Option<String>,
    /// The resolved scalar
    pub value: CellValue,
    /// Formatted render of `value` under `format`
    pub display: String,
    /// Presentational format; never affects `value`
    pub format: CellFormat,
}

impl Cell {
    /// Create a text cell holding the literal input
    pub fn text<S: Into<String>>(input: S) -> Self {
        Self {
            formula: None,
            value: CellValue::Text(input.into()),
            display: String::new(),
            format: CellFormat::default(),
        }
    }

    /// Create a formula cell; the value is filled in by the evaluator
    pub fn formula<S: Into<String>>(raw: S, value: CellValue) -> Self {
        Self {
            formula: Some(raw.into()),
            value,
            display: String::new(),
            format: CellFormat::default(),
        }
    }

    /// Check if the cell holds a formula
    pub fn is_formula(&self) -> bool {
        self.formula.is_some()
    }

    /// Formula text with the marker stripped, if this is a formula cell
    pub fn formula_body(&self) -> Option<&str> {
        self.formula
            .as_deref()
            .map(|f| f.strip_prefix(FORMULA_MARKER).unwrap_or(f))
    }
}
