//! CSV Result Writer - Implementation of ResultWriter for CSV output.

use csv::WriterBuilder;

use crate::domain::analysis::{DecisionMatrix, ScoredAlternative};
use crate::ports::{OutputError, ResultWriter, RANK_COLUMN, SCORE_COLUMN};

/// Writes the input table with score and rank columns appended.
///
/// Scores use the shortest representation that round-trips the `f64`.
#[derive(Debug, Clone, Default)]
pub struct CsvResultWriter;

impl CsvResultWriter {
    /// Creates a new CSV writer.
    pub fn new() -> Self {
        Self
    }
}

impl ResultWriter for CsvResultWriter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn content_type(&self) -> &'static str {
        "text/csv"
    }

    fn write(
        &self,
        matrix: &DecisionMatrix,
        ranking: &[ScoredAlternative],
    ) -> Result<Vec<u8>, OutputError> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());

        let mut header = Vec::with_capacity(matrix.criterion_count() + 3);
        header.push(matrix.id_header().to_string());
        header.extend(matrix.criteria().iter().cloned());
        header.push(SCORE_COLUMN.to_string());
        header.push(RANK_COLUMN.to_string());
        writer
            .write_record(&header)
            .map_err(|e| OutputError::serialization(e.to_string()))?;

        for scored in ranking {
            let mut row = Vec::with_capacity(header.len());
            row.push(scored.id().to_string());
            row.extend(scored.alternative.values.iter().map(f64::to_string));
            row.push(scored.score.to_string());
            row.push(scored.rank.to_string());
            writer
                .write_record(&row)
                .map_err(|e| OutputError::serialization(e.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|e| OutputError::serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::tabular::CsvMatrixReader;
    use crate::domain::analysis::{ImpactVector, TopsisEngine, WeightVector};
    use crate::ports::DecisionMatrixReader;

    fn ranked() -> (DecisionMatrix, Vec<ScoredAlternative>) {
        let matrix = DecisionMatrix::builder()
            .id_header("Model")
            .criteria(vec!["Price", "Storage", "Camera"])
            .alternative("A", vec![250.0, 16.0, 12.0])
            .alternative("B", vec![200.0, 16.0, 8.0])
            .alternative("C", vec![300.0, 32.0, 16.0])
            .build()
            .unwrap();
        let weights: WeightVector = "1,1,1".parse().unwrap();
        let impacts: ImpactVector = "-,+,+".parse().unwrap();
        let ranking = TopsisEngine::compute(&matrix, &weights, &impacts).unwrap();
        (matrix, ranking)
    }

    #[test]
    fn appends_score_and_rank_columns() {
        let (matrix, ranking) = ranked();
        let bytes = CsvResultWriter::new().write(&matrix, &ranking).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Model,Price,Storage,Camera,Topsis Score,Rank")
        );
        assert!(lines.next().unwrap().starts_with("A,250,16,12,"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn keeps_row_order_and_exact_scores() {
        let (matrix, ranking) = ranked();
        let bytes = CsvResultWriter::new().write(&matrix, &ranking).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();

        for (row, scored) in rows.iter().zip(&ranking) {
            assert_eq!(&row[0], scored.id());
            assert_eq!(row[4].parse::<f64>().unwrap(), scored.score);
            assert_eq!(row[5].parse::<u32>().unwrap(), scored.rank);
        }
    }

    #[test]
    fn quotes_identifiers_containing_commas() {
        let matrix = DecisionMatrix::builder()
            .criteria(vec!["X", "Y"])
            .alternative("Acme, Inc.", vec![1.0, 2.0])
            .alternative("Other", vec![2.0, 1.0])
            .build()
            .unwrap();
        let ranking = TopsisEngine::compute(
            &matrix,
            &"1,1".parse().unwrap(),
            &"+,+".parse().unwrap(),
        )
        .unwrap();

        let bytes = CsvResultWriter::new().write(&matrix, &ranking).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("\"Acme, Inc.\""));

        // Score and rank come back as two extra criteria.
        let reread = CsvMatrixReader::new().read(&bytes).unwrap();
        assert_eq!(reread.alternatives()[0].id, "Acme, Inc.");
        assert_eq!(reread.criterion_count(), 4);
    }

    #[test]
    fn reports_csv_format() {
        let writer = CsvResultWriter::new();
        assert_eq!(writer.extension(), "csv");
        assert_eq!(writer.content_type(), "text/csv");
    }
}
