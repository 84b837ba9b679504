//! Delimited plain-text export
//!
//! Renders the sheet's raw values (never the formatted display strings)
//! row-major over the full grid dimensions. Every field is quoted and
//! embedded quotes are doubled, so the output survives any cell content.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use gridcalc_core::CellAddress;

use crate::error::SheetResult;
use crate::sheet::Sheet;

/// Options for delimited export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

/// Delimited text writer
pub struct DelimitedWriter;

impl DelimitedWriter {
    /// Write a sheet to a file
    pub fn write_file<P: AsRef<Path>>(
        sheet: &Sheet,
        path: P,
        options: &ExportOptions,
    ) -> SheetResult<()> {
        let file = File::create(path)?;
        Self::write(sheet, file, options)
    }

    /// Write a sheet to a writer
    ///
    /// Every cell inside the grid dimensions is written, empty ones
    /// included, so the output is a full `rows x cols` rectangle.
    pub fn write<W: Write>(sheet: &Sheet, writer: W, options: &ExportOptions) -> SheetResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(writer);

        for row in 0..sheet.rows() {
            let mut record = Vec::with_capacity(sheet.cols() as usize);
            for col in 0..sheet.cols() {
                let label = CellAddress::new(row, col).to_label();
                let cell = sheet.grid().get(&label);
                record.push(cell.map(|c| c.value.to_string()).unwrap_or_default());
            }
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Render a sheet to a delimited string
    pub fn to_string(sheet: &Sheet, options: &ExportOptions) -> SheetResult<String> {
        let mut buf = Vec::new();
        Self::write(sheet, &mut buf, options)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
