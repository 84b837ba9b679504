//! Textual substitution passes
//!
//! The evaluator reduces a formula to plain arithmetic by substituting text:
//! first recognized aggregate calls, then bare cell references. The formula
//! language has no string literals, so substitution over the uppercased
//! text is always safe.
//!
//! Both passes skip candidates whose preceding character is alphanumeric,
//! so exponent literals like `1E5` survive untouched.

use crate::aggregate::{aggregate, AggregateKind};
use gridcalc_core::{CellAddress, CellRange, Grid};

/// Replace every recognized `FN(START:END)` call with its numeric result
///
/// `FN` is one of SUM, AVG (alias AVERAGE), MIN, MAX, COUNT; the corner
/// labels may come in either order. Unrecognized names and malformed call
/// bodies are left in place for the arithmetic parser to reject.
pub fn expand_aggregates(grid: &Grid, expr: &str) -> String {
    let bytes = expr.as_bytes();
    let mut out = String::with_capacity(expr.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_uppercase() && !prev_is_alnum(bytes, i) {
            let start = i;
            let mut j = i;
            while j < bytes.len() && bytes[j].is_ascii_uppercase() {
                j += 1;
            }

            if let Some(kind) = AggregateKind::from_name(&expr[start..j]) {
                if let Some((range, consumed)) = parse_call_range(&expr[j..]) {
                    out.push_str(&fmt_number(aggregate(grid, kind, &range)));
                    i = j + consumed;
                    continue;
                }
            }

            out.push_str(&expr[start..j]);
            i = j;
            continue;
        }

        // Not a candidate: copy the next char through whole (input may be
        // non-ASCII; the parser rejects it later).
        let ch = expr[i..].chars().next().unwrap_or('\0');
        out.push(ch);
        i += ch.len_utf8().max(1);
    }

    out
}

/// Replace every bare cell reference token with its numeric value
///
/// The cell being evaluated substitutes as 0 (direct self-reference
/// short-circuit; longer cycles are not detected here). Empty, missing,
/// and non-numeric cells substitute as 0 as well.
pub fn expand_refs(grid: &Grid, expr: &str, target: &CellAddress) -> String {
    let bytes = expr.as_bytes();
    let mut out = String::with_capacity(expr.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_uppercase() && !prev_is_alnum(bytes, i) {
            let start = i;
            let mut j = i;
            while j < bytes.len() && bytes[j].is_ascii_uppercase() {
                j += 1;
            }
            let digits_start = j;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }

            if j > digits_start {
                // Letters followed by digits: a cell reference token.
                // Unrepresentable labels (row 0, out-of-range column) read
                // as missing cells.
                let n = match CellAddress::parse(&expr[start..j]) {
                    Ok(addr) if addr == *target => 0.0,
                    Ok(addr) => grid.number_at(&addr).unwrap_or(0.0),
                    Err(_) => 0.0,
                };
                out.push_str(&fmt_number(n));
            } else {
                out.push_str(&expr[start..j]);
            }
            i = j;
            continue;
        }

        let ch = expr[i..].chars().next().unwrap_or('\0');
        out.push(ch);
        i += ch.len_utf8().max(1);
    }

    out
}

/// Parse `(START:END)` at the head of `s`
///
/// Returns the normalized range and the number of bytes consumed,
/// including both parentheses.
fn parse_call_range(s: &str) -> Option<(CellRange, usize)> {
    let rest = s.strip_prefix('(')?;
    let close = rest.find(')')?;
    let (start, end) = rest[..close].split_once(':')?;
    let start = CellAddress::parse(start.trim()).ok()?;
    let end = CellAddress::parse(end.trim()).ok()?;
    Some((CellRange::new(start, end), close + 2))
}

fn prev_is_alnum(bytes: &[u8], i: usize) -> bool {
    i > 0 && bytes[i - 1].is_ascii_alphanumeric()
}

/// Format a substituted number so the arithmetic parser can re-read it
///
/// `f64` Display never emits exponent notation, so the output contains only
/// digits, an optional sign, and an optional decimal point.
fn fmt_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcalc_core::Cell;
    use pretty_assertions::assert_eq;

    fn grid_with(cells: &[(&str, &str)]) -> Grid {
        let mut grid = Grid::new();
        for (label, text) in cells {
            grid.set(label.to_string(), Cell::text(*text));
        }
        grid
    }

    fn target() -> CellAddress {
        CellAddress::parse("Z99").unwrap()
    }

    #[test]
    fn test_expand_aggregates() {
        let grid = grid_with(&[("A1", "2"), ("A2", "3")]);
        assert_eq!(expand_aggregates(&grid, "SUM(A1:A2)"), "5");
        assert_eq!(expand_aggregates(&grid, "1+SUM(A1:A2)*2"), "1+5*2");
        assert_eq!(expand_aggregates(&grid, "AVERAGE(A1:A2)"), "2.5");
        // Corner order does not matter
        assert_eq!(expand_aggregates(&grid, "SUM(A2:A1)"), "5");
    }

    #[test]
    fn test_expand_aggregates_leaves_malformed_calls() {
        let grid = grid_with(&[("A1", "2")]);
        // Unknown function name
        assert_eq!(expand_aggregates(&grid, "MEDIAN(A1:A2)"), "MEDIAN(A1:A2)");
        // No range argument
        assert_eq!(expand_aggregates(&grid, "SUM(A1)"), "SUM(A1)");
        // Unterminated call
        assert_eq!(expand_aggregates(&grid, "SUM(A1:A2"), "SUM(A1:A2");
    }

    #[test]
    fn test_expand_refs() {
        let grid = grid_with(&[("A1", "2"), ("B1", "3.5")]);
        assert_eq!(expand_refs(&grid, "A1+B1", &target()), "2+3.5");
        assert_eq!(expand_refs(&grid, "A1*2", &target()), "2*2");
        // Missing and non-numeric cells read as zero
        assert_eq!(expand_refs(&grid, "C1+1", &target()), "0+1");
        let grid = grid_with(&[("A1", "x")]);
        assert_eq!(expand_refs(&grid, "A1+1", &target()), "0+1");
    }

    #[test]
    fn test_expand_refs_self_reference() {
        let grid = grid_with(&[("Z99", "7")]);
        // The cell being evaluated reads as zero, not its stored value
        assert_eq!(expand_refs(&grid, "Z99+1", &target()), "0+1");
        assert_eq!(expand_refs(&grid, "Z99+Z98", &target()), "0+0");
    }

    #[test]
    fn test_expand_refs_negative_value() {
        let grid = grid_with(&[("A1", "-5")]);
        assert_eq!(expand_refs(&grid, "3-A1", &target()), "3--5");
    }

    #[test]
    fn test_exponent_literal_survives() {
        let grid = grid_with(&[("E5", "9")]);
        // 1E5 is a number, not a reference to E5
        assert_eq!(expand_refs(&grid, "1E5+E5", &target()), "1E5+9");
    }

    #[test]
    fn test_unrepresentable_label_reads_as_missing() {
        let grid = Grid::new();
        assert_eq!(expand_refs(&grid, "A0+1", &target()), "0+1");
        assert_eq!(expand_refs(&grid, "ZZZ1+1", &target()), "0+1");
    }

    #[test]
    fn test_leftover_letters_pass_through() {
        let grid = Grid::new();
        // No digits after the letters: not a reference, parser rejects later
        assert_eq!(expand_refs(&grid, "FOO+1", &target()), "FOO+1");
    }
}
