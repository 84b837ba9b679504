//! Prelude module - common imports for gridcalc users
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    // Range aggregation
    AggregateKind,
    // Cell types
    Cell,
    CellAddress,
    CellFormat,
    CellRange,
    CellValue,
    // Export types
    DelimitedWriter,
    ExportOptions,
    // Core storage
    Grid,
    Locale,
    SelectionStats,
    // Main type
    Sheet,
    // Error types
    SheetError,
    SheetResult,
    // Snapshot types
    SheetSnapshot,
};
