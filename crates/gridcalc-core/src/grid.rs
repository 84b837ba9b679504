//! Sparse, insertion-ordered grid storage
//!
//! Only non-empty cells are stored, keyed by canonical label. The map
//! preserves insertion order; the recalculation sweep depends on that order
//! being reproducible, which is why this is an `IndexMap` and not a
//! `BTreeMap` or `HashMap`.

use indexmap::IndexMap;

use crate::address::CellAddress;
use crate::cell::Cell;
use crate::{DEFAULT_COLS, DEFAULT_ROWS, MAX_COLS, MAX_ROWS, MIN_COLS, MIN_ROWS};

/// Grid dimensions plus the sparse cell store
///
/// Row and column counts are always within `[MIN_ROWS, MAX_ROWS]` and
/// `[MIN_COLS, MAX_COLS]`. Shrinking never deletes out-of-range cell records;
/// they become unreachable through labels inside the grid but stay in the
/// store (it is sparse and keyed by label, not by index).
#[derive(Debug, Clone)]
pub struct Grid {
    title: String,
    rows: u32,
    cols: u16,
    cells: IndexMap<String, Cell>,
}

impl Grid {
    /// Create an empty grid with the default dimensions
    pub fn new() -> Self {
        Self::with_size(DEFAULT_ROWS, DEFAULT_COLS)
    }

    /// Create an empty grid with the given dimensions (clamped to bounds)
    pub fn with_size(rows: u32, cols: u16) -> Self {
        Self {
            title: String::new(),
            rows: rows.clamp(MIN_ROWS, MAX_ROWS),
            cols: cols.clamp(MIN_COLS, MAX_COLS),
            cells: IndexMap::new(),
        }
    }

    /// Get the grid title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the grid title
    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        self.title = title.into();
    }

    /// Get the row count
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Get the column count
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Set the row count, clamped silently into the configured bounds
    pub fn set_rows(&mut self, rows: u32) {
        self.rows = rows.clamp(MIN_ROWS, MAX_ROWS);
    }

    /// Set the column count, clamped silently into the configured bounds
    pub fn set_cols(&mut self, cols: u16) {
        self.cols = cols.clamp(MIN_COLS, MAX_COLS);
    }

    /// Get a cell record; `None` reads as an empty cell
    pub fn get(&self, label: &str) -> Option<&Cell> {
        self.cells.get(label)
    }

    /// Get a mutable cell record
    pub fn get_mut(&mut self, label: &str) -> Option<&mut Cell> {
        self.cells.get_mut(label)
    }

    /// Insert or replace a cell record
    ///
    /// Replacing keeps the cell's original position in the iteration order;
    /// only first insertion appends.
    pub fn set(&mut self, label: String, cell: Cell) {
        self.cells.insert(label, cell);
    }

    /// Remove a cell record entirely
    ///
    /// Uses a shifting removal so the insertion order of the remaining cells
    /// is preserved.
    pub fn remove(&mut self, label: &str) -> Option<Cell> {
        self.cells.shift_remove(label)
    }

    /// Number of stored (non-empty) cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cells are stored
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over stored cells in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(label, cell)| (label.as_str(), cell))
    }

    /// Iterate over stored cells in insertion order, mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Cell)> {
        self.cells
            .iter_mut()
            .map(|(label, cell)| (label.as_str(), cell))
    }

    /// Labels of all formula cells, in insertion order
    pub fn formula_labels(&self) -> Vec<String> {
        self.cells
            .iter()
            .filter(|(_, cell)| cell.is_formula())
            .map(|(label, _)| label.clone())
            .collect()
    }

    /// Numeric value of the cell at `addr`, if it has one
    pub fn number_at(&self, addr: &CellAddress) -> Option<f64> {
        self.get(&addr.to_label()).and_then(|c| c.value.as_number())
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_operations() {
        let mut grid = Grid::new();

        grid.set("A1".into(), Cell::text("hello"));
        assert_eq!(grid.get("A1").unwrap().value, CellValue::Text("hello".into()));
        assert!(grid.get("B2").is_none());
        assert_eq!(grid.cell_count(), 1);

        grid.remove("A1");
        assert!(grid.get("A1").is_none());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut grid = Grid::new();
        grid.set("C3".into(), Cell::text("1"));
        grid.set("A1".into(), Cell::text("2"));
        grid.set("B2".into(), Cell::text("3"));

        let labels: Vec<_> = grid.iter().map(|(l, _)| l.to_string()).collect();
        assert_eq!(labels, ["C3", "A1", "B2"]);

        // Replacing keeps position
        grid.set("A1".into(), Cell::text("2b"));
        let labels: Vec<_> = grid.iter().map(|(l, _)| l.to_string()).collect();
        assert_eq!(labels, ["C3", "A1", "B2"]);

        // Removal shifts without reordering the rest
        grid.remove("A1");
        let labels: Vec<_> = grid.iter().map(|(l, _)| l.to_string()).collect();
        assert_eq!(labels, ["C3", "B2"]);
    }

    #[test]
    fn test_formula_labels() {
        let mut grid = Grid::new();
        grid.set("A1".into(), Cell::text("5"));
        grid.set("B1".into(), Cell::formula("=A1*2", CellValue::Number(10.0)));
        grid.set("C1".into(), Cell::formula("=B1+1", CellValue::Number(11.0)));

        assert_eq!(grid.formula_labels(), ["B1", "C1"]);
    }

    #[test]
    fn test_resize_clamps() {
        let mut grid = Grid::new();

        grid.set_rows(0);
        assert_eq!(grid.rows(), crate::MIN_ROWS);

        grid.set_rows(u32::MAX);
        assert_eq!(grid.rows(), crate::MAX_ROWS);

        grid.set_cols(0);
        assert_eq!(grid.cols(), crate::MIN_COLS);

        grid.set_cols(u16::MAX);
        assert_eq!(grid.cols(), crate::MAX_COLS);
    }

    #[test]
    fn test_shrink_keeps_out_of_range_cells() {
        let mut grid = Grid::with_size(100, 26);
        grid.set("Z100".into(), Cell::text("keep me"));

        grid.set_rows(10);
        grid.set_cols(5);

        // The record survives the shrink even though the index is out of range
        assert_eq!(grid.get("Z100").unwrap().value, CellValue::Text("keep me".into()));
    }

    #[test]
    fn test_number_at() {
        let mut grid = Grid::new();
        grid.set("A1".into(), Cell::text("2.5"));
        grid.set("A2".into(), Cell::text("x"));

        assert_eq!(grid.number_at(&CellAddress::new(0, 0)), Some(2.5));
        assert_eq!(grid.number_at(&CellAddress::new(1, 0)), None);
        assert_eq!(grid.number_at(&CellAddress::new(2, 0)), None);
    }
}
