//! Tabular adapters - Reading decision matrices from and writing results to tables.
//!
//! - `CsvMatrixReader` - Parses comma-separated uploads
//! - `XlsxMatrixReader` - Parses the first worksheet of an Excel workbook
//! - `CsvResultWriter` - Writes the table back with score and rank columns

mod csv_reader;
mod csv_writer;
mod xlsx_reader;

pub use csv_reader::CsvMatrixReader;
pub use csv_writer::CsvResultWriter;
pub use xlsx_reader::XlsxMatrixReader;

use crate::ports::InputError;

/// Cell contents treated as a missing value.
const MISSING_MARKERS: &[&str] = &["", "na", "n/a", "nan", "null"];

/// Parses one textual criterion cell. `row` is 1-based over data rows.
fn parse_criterion_cell(cell: &str, row: usize, column: &str) -> Result<f64, InputError> {
    let cell = cell.trim();
    if MISSING_MARKERS.contains(&cell.to_ascii_lowercase().as_str()) {
        return Err(InputError::MissingValue {
            row,
            column: column.to_string(),
        });
    }

    cell.parse::<f64>().map_err(|_| InputError::NonNumericColumn {
        column: column.to_string(),
        row,
        value: cell.to_string(),
    })
}
