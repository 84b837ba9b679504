//! JSON snapshot capture and restore
//!
//! A snapshot is the persistent form of a sheet: title, dimensions, and a
//! map from cell label to stored content. Formula cells persist their raw
//! input and their last value; restoring seeds them with that value and
//! re-runs one recalculation sweep over the seeded state. Restore parses
//! the whole document before touching any state; a malformed snapshot
//! fails wholesale.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use gridcalc_core::{Cell, CellAddress, CellFormat, CellValue, Grid, ERROR_MARKER};
use serde::{Deserialize, Serialize};

use crate::error::SheetResult;
use crate::sheet::Sheet;

/// Serialized form of a sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetSnapshot {
    /// Sheet title
    #[serde(default)]
    pub title: String,
    /// Row count; clamped into bounds on restore
    #[serde(default = "default_rows")]
    pub rows: u32,
    /// Column count; clamped into bounds on restore
    #[serde(default = "default_cols")]
    pub cols: u16,
    /// Stored cells, keyed by label
    #[serde(default)]
    pub data: BTreeMap<String, CellRecord>,
}

fn default_rows() -> u32 {
    gridcalc_core::DEFAULT_ROWS
}

fn default_cols() -> u16 {
    gridcalc_core::DEFAULT_COLS
}

/// Serialized form of one cell
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellRecord {
    /// The stored value; numbers persist as JSON numbers, text as strings
    #[serde(default)]
    pub value: RawValue,
    /// The original `=`-prefixed input, for formula cells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    /// Presentational format; omitted when default
    #[serde(default, skip_serializing_if = "is_default_format")]
    pub format: CellFormat,
}

fn is_default_format(format: &CellFormat) -> bool {
    *format == CellFormat::None
}

/// A stored value as it appears in JSON
///
/// The error state has no JSON representation of its own; it persists as
/// the error marker text. Restore never needs to map it back, because a
/// formula cell is re-evaluated and a non-formula cell cannot hold an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Text(String::new())
    }
}

impl From<&CellValue> for RawValue {
    fn from(value: &CellValue) -> Self {
        match value {
            CellValue::Number(n) => RawValue::Number(*n),
            CellValue::Text(s) => RawValue::Text(s.clone()),
            CellValue::Error => RawValue::Text(ERROR_MARKER.to_string()),
        }
    }
}

impl From<RawValue> for CellValue {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Number(n) => CellValue::Number(n),
            RawValue::Text(s) => CellValue::Text(s),
        }
    }
}

impl SheetSnapshot {
    /// Capture the current state of a sheet
    pub fn capture(sheet: &Sheet) -> Self {
        let grid = sheet.grid();
        let data = grid
            .iter()
            .map(|(label, cell)| {
                let record = CellRecord {
                    value: RawValue::from(&cell.value),
                    formula: cell.formula.clone(),
                    format: cell.format,
                };
                (label.to_string(), record)
            })
            .collect();

        Self {
            title: grid.title().to_string(),
            rows: grid.rows(),
            cols: grid.cols(),
            data,
        }
    }

    /// Rebuild a sheet from this snapshot
    ///
    /// Dimensions are clamped into bounds. Records under invalid labels are
    /// skipped. Cells are inserted in label order, which fixes the
    /// recalculation order of the restored sheet; the sweep then
    /// re-evaluates every formula against the seeded values.
    pub fn restore(self) -> Sheet {
        let mut grid = Grid::with_size(self.rows, self.cols);
        grid.set_title(self.title);

        for (label, record) in self.data {
            let label = match CellAddress::parse(&label) {
                Ok(addr) => addr.to_label(),
                Err(_) => {
                    log::warn!("skipping snapshot record with invalid label {:?}", label);
                    continue;
                }
            };

            // Formula cells are seeded with their persisted value so the
            // post-restore sweep reads converged inputs, not empty cells.
            // Label order and insertion order differ, so seeding from
            // scratch would re-run the whole edit history in the wrong
            // order.
            let mut cell = match record.formula {
                Some(formula) => Cell::formula(formula, record.value.into()),
                None => Cell {
                    value: record.value.into(),
                    ..Cell::default()
                },
            };
            cell.format = record.format;
            grid.set(label, cell);
        }

        Sheet::from_grid(grid)
    }
}

impl Sheet {
    /// Serialize the sheet to a JSON snapshot string
    pub fn to_json(&self) -> SheetResult<String> {
        Ok(serde_json::to_string_pretty(&SheetSnapshot::capture(
            self,
        ))?)
    }

    /// Rebuild a sheet from a JSON snapshot string
    ///
    /// The document is parsed in full before any sheet is built, so a
    /// malformed snapshot produces an error and nothing else.
    pub fn from_json(json: &str) -> SheetResult<Self> {
        let snapshot: SheetSnapshot = serde_json::from_str(json)?;
        Ok(snapshot.restore())
    }

    /// Write the JSON snapshot to a file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> SheetResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a JSON snapshot from a file
    pub fn load_json<P: AsRef<Path>>(path: P) -> SheetResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}
