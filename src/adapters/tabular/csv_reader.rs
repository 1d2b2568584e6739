//! CSV Matrix Reader - Implementation of DecisionMatrixReader for CSV files.

use csv::{ReaderBuilder, Trim};

use crate::domain::analysis::{Alternative, DecisionMatrix};
use crate::ports::{DecisionMatrixReader, InputError, MIN_COLUMNS};

use super::parse_criterion_cell;

/// Reads comma-separated tables.
///
/// # Format
///
/// ```text
/// Model,Price,Storage,Camera,Looks
/// A,250,16,12,5
/// B,200,16,8,3
/// ```
///
/// The first row is the header, the first column the identifier. Cells are
/// trimmed; empty lines are skipped. Every row must have as many cells as the
/// header.
#[derive(Debug, Clone, Default)]
pub struct CsvMatrixReader;

impl CsvMatrixReader {
    /// Creates a new CSV reader.
    pub fn new() -> Self {
        Self
    }
}

impl DecisionMatrixReader for CsvMatrixReader {
    fn supports(&self, filename: &str) -> bool {
        filename.to_ascii_lowercase().ends_with(".csv")
    }

    fn read(&self, content: &[u8]) -> Result<DecisionMatrix, InputError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(content);

        let headers = reader
            .headers()
            .map_err(|e| InputError::unreadable(e.to_string()))?
            .clone();

        if headers.len() < MIN_COLUMNS {
            return Err(InputError::TooFewColumns {
                found: headers.len(),
            });
        }

        let id_header = headers.get(0).unwrap_or_default().to_string();
        let criteria: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

        let mut alternatives = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| InputError::unreadable(e.to_string()))?;
            let row = index + 1;

            let values = criteria
                .iter()
                .enumerate()
                .map(|(c, column)| {
                    parse_criterion_cell(record.get(c + 1).unwrap_or(""), row, column)
                })
                .collect::<Result<Vec<_>, _>>()?;

            let id = record.get(0).unwrap_or_default();
            alternatives.push(Alternative::new(id, values));
        }

        Ok(DecisionMatrix::new(id_header, criteria, alternatives)?)
    }
}
