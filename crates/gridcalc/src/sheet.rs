//! The sheet facade
//!
//! Ties the grid, the formula engine, and the formatter together behind the
//! edit operations a renderer calls. Every edit triggers one recalculation
//! sweep; see [`Sheet::recalculate`] for the ordering contract.

use gridcalc_core::{
    format_value, Cell, CellAddress, CellFormat, CellValue, Grid, Locale, FORMULA_MARKER,
};
use gridcalc_formula::{evaluate, selection_stats, SelectionStats};

use crate::error::SheetResult;

/// A single spreadsheet: grid storage plus rendering locale
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    grid: Grid,
    locale: Locale,
}

impl Sheet {
    /// Create an empty sheet with the default dimensions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sheet with the given dimensions (clamped to bounds)
    pub fn with_size(rows: u32, cols: u16) -> Self {
        Self {
            grid: Grid::with_size(rows, cols),
            locale: Locale::default(),
        }
    }

    /// Build a sheet around an existing grid and run one recalculation
    pub fn from_grid(grid: Grid) -> Self {
        let mut sheet = Self {
            grid,
            locale: Locale::default(),
        };
        sheet.recalculate();
        sheet
    }

    /// The underlying grid, for read-only inspection and aggregation
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get the sheet title
    pub fn title(&self) -> &str {
        self.grid.title()
    }

    /// Set the sheet title
    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        self.grid.set_title(title);
    }

    /// Get the row count
    pub fn rows(&self) -> u32 {
        self.grid.rows()
    }

    /// Get the column count
    pub fn cols(&self) -> u16 {
        self.grid.cols()
    }

    /// Resize the sheet; both counts are clamped silently into bounds
    ///
    /// Shrinking hides out-of-range cells but never deletes their records.
    pub fn resize(&mut self, rows: u32, cols: u16) {
        self.grid.set_rows(rows);
        self.grid.set_cols(cols);
    }

    /// The rendering locale
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Change the rendering locale and re-render every display string
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
        self.refresh_displays();
    }

    /// Enter user input into a cell
    ///
    /// Empty input clears the cell. Input starting with `=` is stored as a
    /// formula and evaluated on the spot, so the recalculation sweep that
    /// follows reads this cell's new value, never a placeholder. Anything
    /// else is stored as literal text. A cell's format survives re-entry of
    /// its content. Every path ends with one recalculation sweep.
    pub fn set_cell(&mut self, label: &str, input: &str) -> SheetResult<()> {
        let addr = CellAddress::parse(label)?;
        let label = addr.to_label();

        if input.is_empty() {
            self.grid.remove(&label);
            self.recalculate();
            return Ok(());
        }

        let format = self.grid.get(&label).map(|c| c.format).unwrap_or_default();
        let is_formula = input.starts_with(FORMULA_MARKER);
        let mut cell = if is_formula {
            Cell::formula(input, CellValue::empty())
        } else {
            Cell::text(input)
        };
        cell.format = format;
        self.grid.set(label.clone(), cell);

        if is_formula {
            let body = input.strip_prefix(FORMULA_MARKER).unwrap_or(input);
            let value = evaluate(&self.grid, &addr, body);
            if let Some(cell) = self.grid.get_mut(&label) {
                cell.value = value;
            }
        }

        self.recalculate();
        Ok(())
    }

    /// Clear a cell, removing its record entirely (format included)
    pub fn clear_cell(&mut self, label: &str) -> SheetResult<()> {
        let label = canonical(label)?;
        self.grid.remove(&label);
        self.recalculate();
        Ok(())
    }

    /// Set the presentational format of a cell
    ///
    /// Formatting an empty cell creates a record carrying only the format.
    /// The stored value is never touched; only the display string changes.
    pub fn set_format(&mut self, label: &str, format: CellFormat) -> SheetResult<()> {
        let label = canonical(label)?;

        let locale = &self.locale;
        match self.grid.get_mut(&label) {
            Some(cell) => {
                cell.format = format;
                cell.display = format_value(&cell.value, format, locale);
            }
            None => {
                let mut cell = Cell {
                    format,
                    ..Cell::default()
                };
                cell.display = format_value(&cell.value, format, locale);
                self.grid.set(label, cell);
            }
        }
        Ok(())
    }

    /// The formatted display string of a cell (empty string for empty cells)
    pub fn display_value(&self, label: &str) -> String {
        canonical(label)
            .ok()
            .and_then(|l| self.grid.get(&l))
            .map(|c| c.display.clone())
            .unwrap_or_default()
    }

    /// The stored value of a cell; empty cells read as empty text
    pub fn raw_value(&self, label: &str) -> CellValue {
        canonical(label)
            .ok()
            .and_then(|l| self.grid.get(&l))
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    /// The original `=`-prefixed input, if the cell holds a formula
    pub fn formula_text(&self, label: &str) -> Option<String> {
        canonical(label)
            .ok()
            .and_then(|l| self.grid.get(&l))
            .and_then(|c| c.formula.clone())
    }

    /// The presentational format of a cell
    pub fn format(&self, label: &str) -> CellFormat {
        canonical(label)
            .ok()
            .and_then(|l| self.grid.get(&l))
            .map(|c| c.format)
            .unwrap_or_default()
    }

    /// Number of stored (non-empty) cells
    pub fn cell_count(&self) -> usize {
        self.grid.cell_count()
    }

    /// Sum, average, and count over the numeric cells of a selection
    pub fn selection_stats<'a, I>(&self, labels: I) -> SelectionStats
    where
        I: IntoIterator<Item = &'a str>,
    {
        selection_stats(&self.grid, labels)
    }

    /// Re-evaluate every formula cell, then re-render all display strings
    ///
    /// This is a single sweep over the formula cells in insertion order.
    /// Each evaluation reads whatever its referenced cells hold at that
    /// moment, so a formula stored before the cells it reads sees their
    /// previous values until the next sweep. The order is stable and the
    /// values converge under repeated edits; there is no dependency graph
    /// and no cycle detection beyond the direct self-reference
    /// short-circuit in the evaluator.
    pub fn recalculate(&mut self) {
        let labels = self.grid.formula_labels();
        for label in &labels {
            let Ok(addr) = CellAddress::parse(label) else {
                continue;
            };
            let body = match self.grid.get(label).and_then(|c| c.formula_body()) {
                Some(body) => body.to_string(),
                None => continue,
            };

            let value = evaluate(&self.grid, &addr, &body);
            if let Some(cell) = self.grid.get_mut(label) {
                cell.value = value;
            }
        }
        log::debug!("recalculated {} formula cells", labels.len());

        self.refresh_displays();
    }

    fn refresh_displays(&mut self) {
        let locale = &self.locale;
        for (_, cell) in self.grid.iter_mut() {
            cell.display = format_value(&cell.value, cell.format, locale);
        }
    }
}

/// Validate a label and normalize it to canonical form (`A01` becomes `A1`)
fn canonical(label: &str) -> SheetResult<String> {
    Ok(CellAddress::parse(label)?.to_label())
}
