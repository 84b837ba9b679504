//! Range aggregation
//!
//! Computes SUM/AVG/MIN/MAX/COUNT over the numeric cells of a rectangular
//! range, for formulas and for ad-hoc selection statistics. Cells that are
//! empty or non-numeric are excluded from the value set, not treated as
//! zero. (Bare-reference substitution zero-fills instead; the two policies
//! are different on purpose, and callers rely on each.)

use gridcalc_core::{CellRange, Grid};

/// A range-aggregate function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    Sum,
    Avg,
    Min,
    Max,
    Count,
}

impl AggregateKind {
    /// Look up a function by name
    ///
    /// Names are matched uppercase only; the evaluator uppercases formula
    /// text before any name reaches this. `AVERAGE` is an alias of `AVG`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "SUM" => Some(AggregateKind::Sum),
            "AVG" | "AVERAGE" => Some(AggregateKind::Avg),
            "MIN" => Some(AggregateKind::Min),
            "MAX" => Some(AggregateKind::Max),
            "COUNT" => Some(AggregateKind::Count),
            _ => None,
        }
    }
}

/// Aggregate the numeric cells of `range`
///
/// Every kind returns 0 over an empty value set; in particular `AVG` of
/// nothing is 0, not a division fault.
pub fn aggregate(grid: &Grid, kind: AggregateKind, range: &CellRange) -> f64 {
    let values: Vec<f64> = range
        .cells()
        .filter_map(|addr| grid.number_at(&addr))
        .collect();

    match kind {
        AggregateKind::Sum => values.iter().sum(),
        AggregateKind::Avg => {
            if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            }
        }
        AggregateKind::Min => values.iter().copied().reduce(f64::min).unwrap_or(0.0),
        AggregateKind::Max => values.iter().copied().reduce(f64::max).unwrap_or(0.0),
        AggregateKind::Count => values.len() as f64,
    }
}

/// Ad-hoc statistics over the renderer's current selection
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionStats {
    /// Sum of the numeric cells
    pub sum: f64,
    /// Average of the numeric cells (0 if none)
    pub average: f64,
    /// Number of numeric cells
    pub count: usize,
}

/// Compute sum/average/count over an arbitrary set of cell labels
///
/// Same exclusion policy as [`aggregate`]: only cells with a numeric view
/// participate. Invalid or missing labels contribute nothing.
pub fn selection_stats<'a, I>(grid: &Grid, labels: I) -> SelectionStats
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sum = 0.0;
    let mut count = 0usize;

    for label in labels {
        if let Some(n) = grid.get(label).and_then(|c| c.value.as_number()) {
            sum += n;
            count += 1;
        }
    }

    SelectionStats {
        sum,
        average: if count == 0 { 0.0 } else { sum / count as f64 },
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcalc_core::{Cell, CellValue};
    use pretty_assertions::assert_eq;

    fn grid_with(cells: &[(&str, &str)]) -> Grid {
        let mut grid = Grid::new();
        for (label, text) in cells {
            grid.set(label.to_string(), Cell::text(*text));
        }
        grid
    }

    fn agg(grid: &Grid, kind: AggregateKind, range: &str) -> f64 {
        aggregate(grid, kind, &CellRange::parse(range).unwrap())
    }

    #[test]
    fn test_from_name() {
        assert_eq!(AggregateKind::from_name("SUM"), Some(AggregateKind::Sum));
        assert_eq!(AggregateKind::from_name("AVG"), Some(AggregateKind::Avg));
        assert_eq!(AggregateKind::from_name("AVERAGE"), Some(AggregateKind::Avg));
        assert_eq!(AggregateKind::from_name("COUNT"), Some(AggregateKind::Count));
        assert_eq!(AggregateKind::from_name("sum"), None);
        assert_eq!(AggregateKind::from_name("MEDIAN"), None);
    }

    #[test]
    fn test_sum_avg() {
        let grid = grid_with(&[("A1", "2"), ("A2", "3"), ("A3", "4")]);
        assert_eq!(agg(&grid, AggregateKind::Sum, "A1:A3"), 9.0);
        assert_eq!(agg(&grid, AggregateKind::Avg, "A1:A3"), 3.0);
    }

    #[test]
    fn test_min_max_count() {
        let grid = grid_with(&[("A1", "7"), ("B1", "-2"), ("C1", "4")]);
        assert_eq!(agg(&grid, AggregateKind::Min, "A1:C1"), -2.0);
        assert_eq!(agg(&grid, AggregateKind::Max, "A1:C1"), 7.0);
        assert_eq!(agg(&grid, AggregateKind::Count, "A1:C1"), 3.0);
    }

    #[test]
    fn test_non_numeric_excluded() {
        let grid = grid_with(&[("A1", "2"), ("A2", "x")]);
        // The text cell is excluded, not coerced to zero
        assert_eq!(agg(&grid, AggregateKind::Sum, "A1:A2"), 2.0);
        assert_eq!(agg(&grid, AggregateKind::Count, "A1:A2"), 1.0);
        assert_eq!(agg(&grid, AggregateKind::Avg, "A1:A2"), 2.0);
        assert_eq!(agg(&grid, AggregateKind::Min, "A1:A2"), 2.0);
    }

    #[test]
    fn test_error_cells_excluded() {
        let mut grid = grid_with(&[("A1", "5")]);
        grid.set("A2".into(), Cell::formula("=1/0", CellValue::Error));
        assert_eq!(agg(&grid, AggregateKind::Sum, "A1:A2"), 5.0);
        assert_eq!(agg(&grid, AggregateKind::Count, "A1:A2"), 1.0);
    }

    #[test]
    fn test_empty_range_policy() {
        let grid = Grid::new();
        assert_eq!(agg(&grid, AggregateKind::Sum, "A1:C10"), 0.0);
        assert_eq!(agg(&grid, AggregateKind::Avg, "A1:C10"), 0.0);
        assert_eq!(agg(&grid, AggregateKind::Min, "A1:C10"), 0.0);
        assert_eq!(agg(&grid, AggregateKind::Max, "A1:C10"), 0.0);
        assert_eq!(agg(&grid, AggregateKind::Count, "A1:C10"), 0.0);
    }

    #[test]
    fn test_selection_stats() {
        let grid = grid_with(&[("A1", "2"), ("B1", "4"), ("C1", "x")]);
        let stats = selection_stats(&grid, ["A1", "B1", "C1", "D9"]);
        assert_eq!(stats.sum, 6.0);
        assert_eq!(stats.average, 3.0);
        assert_eq!(stats.count, 2);

        let empty = selection_stats(&grid, ["C1", "D9"]);
        assert_eq!(empty.sum, 0.0);
        assert_eq!(empty.average, 0.0);
        assert_eq!(empty.count, 0);
    }
}
