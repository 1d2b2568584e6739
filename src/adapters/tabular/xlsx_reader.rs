//! Excel Matrix Reader - Implementation of DecisionMatrixReader for workbooks.
//!
//! Reads `.xlsx` and legacy `.xls` files. Only the first worksheet is used.

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;

use crate::domain::analysis::{Alternative, DecisionMatrix};
use crate::ports::{DecisionMatrixReader, InputError, MIN_COLUMNS};

use super::parse_criterion_cell;

const EXTENSIONS: &[&str] = &[".xlsx", ".xls"];

/// Reads the first worksheet of an Excel workbook.
///
/// The layout matches the CSV reader: header row first, identifier in the
/// first column. Blank rows are skipped. Numeric cells are taken as is;
/// text cells are parsed like CSV cells, so `" 12 "` is accepted and
/// `"NA"` is a missing value. Excel error cells (`#N/A`, `#DIV/0!`) count
/// as missing.
#[derive(Debug, Clone, Default)]
pub struct XlsxMatrixReader;

impl XlsxMatrixReader {
    /// Creates a new workbook reader.
    pub fn new() -> Self {
        Self
    }

    fn first_sheet(content: &[u8]) -> Result<Range<Data>, InputError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(content.to_vec()))
            .map_err(|e| InputError::unreadable(e.to_string()))?;

        workbook
            .worksheet_range_at(0)
            .ok_or_else(|| InputError::unreadable("workbook has no worksheets"))?
            .map_err(|e| InputError::unreadable(e.to_string()))
    }

    fn parse_cell(cell: &Data, row: usize, column: &str) -> Result<f64, InputError> {
        match cell {
            Data::Float(value) => Ok(*value),
            Data::Int(value) => Ok(*value as f64),
            Data::String(text) => parse_criterion_cell(text, row, column),
            Data::Empty | Data::Error(_) => Err(InputError::MissingValue {
                row,
                column: column.to_string(),
            }),
            other => Err(InputError::NonNumericColumn {
                column: column.to_string(),
                row,
                value: other.to_string(),
            }),
        }
    }

    fn is_blank(row: &[Data]) -> bool {
        row.iter().all(|cell| match cell {
            Data::Empty => true,
            Data::String(text) => text.trim().is_empty(),
            _ => false,
        })
    }
}

impl DecisionMatrixReader for XlsxMatrixReader {
    fn supports(&self, filename: &str) -> bool {
        let filename = filename.to_ascii_lowercase();
        EXTENSIONS.iter().any(|ext| filename.ends_with(ext))
    }

    fn read(&self, content: &[u8]) -> Result<DecisionMatrix, InputError> {
        let sheet = Self::first_sheet(content)?;
        let mut rows = sheet.rows().filter(|row| !Self::is_blank(row));

        let headers: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect())
            .unwrap_or_default();

        if headers.len() < MIN_COLUMNS {
            return Err(InputError::TooFewColumns {
                found: headers.len(),
            });
        }

        let id_header = headers[0].clone();
        let criteria: Vec<String> = headers[1..].to_vec();

        let mut alternatives = Vec::new();
        for (index, cells) in rows.enumerate() {
            let row = index + 1;

            let values = criteria
                .iter()
                .enumerate()
                .map(|(c, column)| {
                    let cell = cells.get(c + 1).unwrap_or(&Data::Empty);
                    Self::parse_cell(cell, row, column)
                })
                .collect::<Result<Vec<_>, _>>()?;

            let id = cells
                .first()
                .map(|cell| cell.to_string().trim().to_string())
                .unwrap_or_default();
            alternatives.push(Alternative::new(id, values));
        }

        Ok(DecisionMatrix::new(id_header, criteria, alternatives)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONES: &[u8] = include_bytes!("../../../tests/fixtures/phones.xlsx");
    const MISSING_VALUE: &[u8] = include_bytes!("../../../tests/fixtures/missing_value.xlsx");
    const NON_NUMERIC: &[u8] = include_bytes!("../../../tests/fixtures/non_numeric.xlsx");
    const TEXT_NUMBERS: &[u8] = include_bytes!("../../../tests/fixtures/text_numbers.xlsx");
    const NARROW: &[u8] = include_bytes!("../../../tests/fixtures/narrow.xlsx");

    fn read(content: &[u8]) -> Result<DecisionMatrix, InputError> {
        XlsxMatrixReader::new().read(content)
    }

    #[test]
    fn supports_excel_files_only() {
        let reader = XlsxMatrixReader::new();
        assert!(reader.supports("data.xlsx"));
        assert!(reader.supports("DATA.XLS"));
        assert!(!reader.supports("data.csv"));
        assert!(!reader.supports("data.xlsx.txt"));
    }

    #[test]
    fn reads_header_and_rows() {
        let matrix = read(PHONES).unwrap();

        assert_eq!(matrix.id_header(), "Model");
        assert_eq!(matrix.criteria(), &["Price", "Storage", "Camera", "Looks"]);
        assert_eq!(matrix.alternative_count(), 4);
        assert_eq!(matrix.alternatives()[2].id, "C");
        assert_eq!(matrix.alternatives()[2].values, vec![300.0, 32.0, 16.0, 4.0]);
    }

    #[test]
    fn numeric_text_cells_are_parsed() {
        let matrix = read(TEXT_NUMBERS).unwrap();

        assert_eq!(matrix.alternatives()[0].values, vec![1.5, 2.0]);
        assert_eq!(matrix.alternatives()[1].values, vec![3.0, 3.0]);
    }

    #[test]
    fn empty_cell_is_missing_value() {
        let err = read(MISSING_VALUE).unwrap_err();
        assert_eq!(
            err,
            InputError::MissingValue {
                row: 2,
                column: "Price".to_string(),
            }
        );
    }

    #[test]
    fn text_cell_names_its_column() {
        let err = read(NON_NUMERIC).unwrap_err();
        assert_eq!(
            err,
            InputError::NonNumericColumn {
                column: "Looks".to_string(),
                row: 1,
                value: "good".to_string(),
            }
        );
    }

    #[test]
    fn too_few_columns_is_rejected() {
        let err = read(NARROW).unwrap_err();
        assert_eq!(err, InputError::TooFewColumns { found: 2 });
    }

    #[test]
    fn boolean_cell_is_non_numeric() {
        let err = XlsxMatrixReader::parse_cell(&Data::Bool(true), 3, "Flag").unwrap_err();
        assert!(matches!(err, InputError::NonNumericColumn { row: 3, .. }));
    }

    #[test]
    fn error_cell_is_missing_value() {
        let cell = Data::Error(calamine::CellErrorType::NA);
        let err = XlsxMatrixReader::parse_cell(&cell, 1, "Price").unwrap_err();
        assert!(matches!(err, InputError::MissingValue { row: 1, .. }));
    }

    #[test]
    fn garbage_is_unreadable() {
        let err = read(b"Name,X,Y\na,1,2\n").unwrap_err();
        assert!(matches!(err, InputError::UnreadableFile { .. }));
    }
}
