//! Formula evaluation pipeline

use crate::error::{FormulaError, FormulaResult};
use crate::parser::parse_expr;
use crate::substitute::{expand_aggregates, expand_refs};
use gridcalc_core::{CellAddress, CellValue, Grid};

/// Evaluate formula body text for the cell at `target`
///
/// `body` is the formula with the leading marker already stripped. Any
/// fault collapses to [`CellValue::Error`]; the caller keeps the raw
/// formula text so the user can correct it.
pub fn evaluate(grid: &Grid, target: &CellAddress, body: &str) -> CellValue {
    match try_evaluate(grid, target, body) {
        Ok(n) => CellValue::Number(n),
        Err(_) => CellValue::Error,
    }
}

/// Evaluate formula body text, keeping the failure reason
///
/// The pass order is fixed: uppercase, aggregate-call substitution,
/// bare-reference substitution, arithmetic evaluation.
///
/// `target` breaks direct self-references (they read as 0). Longer cycles
/// are not detected; the substitution design trades that for not building a
/// dependency graph at all.
pub fn try_evaluate(grid: &Grid, target: &CellAddress, body: &str) -> FormulaResult<f64> {
    let upper = body.to_uppercase();
    let expanded = expand_aggregates(grid, &upper);
    let arithmetic = expand_refs(grid, &expanded, target);

    let n = parse_expr(&arithmetic)?.eval();
    if n.is_finite() {
        Ok(n)
    } else {
        Err(FormulaError::NonFinite)
    }
}
