//! RankAlternativesHandler - Command handler for ranking an uploaded table.
//!
//! Runs the full pipeline: read the table, score it with TOPSIS, write the
//! result file, store it and optionally e-mail it.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::analysis::{
    DecisionMatrix, ImpactVector, TopsisEngine, TopsisError, TopsisEvaluation, WeightVector,
};
use crate::domain::foundation::ErrorCode;
use crate::ports::{
    result_name_for, Attachment, DecisionMatrixReader, DeliveryError, InputError, OutputError,
    Recipient, ResultDelivery, ResultStore, ResultWriter, StorageError, StoredResult,
};

/// Command to rank the alternatives of an uploaded table.
#[derive(Debug, Clone)]
pub struct RankAlternativesCommand {
    /// Name of the uploaded file; selects the reader and names the result.
    pub filename: String,
    pub content: Vec<u8>,
    /// Comma-separated weights, e.g. `"1,1,1,2"`.
    pub weights: String,
    /// Comma-separated impacts, e.g. `"+,+,-,+"`.
    pub impacts: String,
    /// Optional e-mail address to send the result to.
    pub recipient: Option<String>,
    /// Overrides the derived `result_<stem>.<ext>` name.
    pub output_name: Option<String>,
}

/// Outcome of the optional e-mail step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    NotRequested,
    Delivered { recipient: String },
    Failed { recipient: String, reason: String },
}

impl DeliveryStatus {
    /// Returns a user-facing warning if delivery failed.
    pub fn warning(&self) -> Option<String> {
        match self {
            Self::Failed { recipient, reason } => Some(format!(
                "Result computed, but sending it to {} failed: {}",
                recipient, reason
            )),
            _ => None,
        }
    }
}

/// Result of a successful ranking.
#[derive(Debug, Clone)]
pub struct RankAlternativesResult {
    pub matrix: DecisionMatrix,
    pub evaluation: TopsisEvaluation,
    pub stored: StoredResult,
    pub delivery: DeliveryStatus,
}

/// Errors that abort a ranking. Delivery failures are not among them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Engine(#[from] TopsisError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    InvalidRecipient(DeliveryError),
}

impl RankError {
    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Input(err) => err.code(),
            Self::Engine(err) => err.code(),
            Self::Output(_) => ErrorCode::InternalError,
            Self::Storage(err) => err.code(),
            Self::InvalidRecipient(err) => err.code(),
        }
    }

    /// True when the caller supplied bad input, as opposed to a server fault.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Input(_) | Self::Engine(_) | Self::InvalidRecipient(_) => true,
            Self::Storage(err) => matches!(err, StorageError::InvalidName { .. }),
            Self::Output(_) => false,
        }
    }
}

/// Handler for ranking uploaded tables.
pub struct RankAlternativesHandler {
    readers: Vec<Arc<dyn DecisionMatrixReader>>,
    writer: Arc<dyn ResultWriter>,
    store: Arc<dyn ResultStore>,
    delivery: Arc<dyn ResultDelivery>,
}

impl RankAlternativesHandler {
    pub fn new(
        readers: Vec<Arc<dyn DecisionMatrixReader>>,
        writer: Arc<dyn ResultWriter>,
        store: Arc<dyn ResultStore>,
        delivery: Arc<dyn ResultDelivery>,
    ) -> Self {
        Self {
            readers,
            writer,
            store,
            delivery,
        }
    }

    pub async fn handle(
        &self,
        cmd: RankAlternativesCommand,
    ) -> Result<RankAlternativesResult, RankError> {
        // 1. Pick a reader for the file type
        let reader = self
            .readers
            .iter()
            .find(|r| r.supports(&cmd.filename))
            .ok_or_else(|| InputError::unsupported(&cmd.filename))?;

        // 2. Parse parameters
        let weights: WeightVector = cmd.weights.parse()?;
        let impacts: ImpactVector = cmd.impacts.parse()?;

        // 3. Validate the recipient before doing any work
        let recipient = cmd
            .recipient
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
            .map(Recipient::parse)
            .transpose()
            .map_err(RankError::InvalidRecipient)?;

        // 4. Read and score
        let matrix = reader.read(&cmd.content)?;
        debug!(
            file = %cmd.filename,
            alternatives = matrix.alternative_count(),
            criteria = matrix.criterion_count(),
            "Decision matrix read"
        );
        let evaluation = TopsisEngine::evaluate(&matrix, &weights, &impacts)?;

        // 5. Serialize and store
        let content = self.writer.write(&matrix, &evaluation.ranking)?;
        let name = cmd
            .output_name
            .unwrap_or_else(|| result_name_for(&cmd.filename, self.writer.extension()));
        let stored = self.store.save(&name, &content).await?;

        info!(
            result_file = %stored.name,
            alternatives = matrix.alternative_count(),
            best = evaluation.best().map(|s| s.id()).unwrap_or_default(),
            "Ranking completed"
        );

        // 6. Deliver, never failing the request
        let delivery = match recipient {
            None => DeliveryStatus::NotRequested,
            Some(recipient) => {
                let attachment =
                    Attachment::new(stored.name.clone(), self.writer.content_type(), content);
                match self.delivery.deliver(&recipient, &attachment).await {
                    Ok(()) => DeliveryStatus::Delivered {
                        recipient: recipient.to_string(),
                    },
                    Err(err) => {
                        warn!(recipient = %recipient, error = %err, "Result delivery failed");
                        DeliveryStatus::Failed {
                            recipient: recipient.to_string(),
                            reason: err.to_string(),
                        }
                    }
                }
            }
        };

        Ok(RankAlternativesResult {
            matrix,
            evaluation,
            stored,
            delivery,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::email::InMemoryDelivery;
    use crate::adapters::storage::InMemoryResultStore;
    use crate::adapters::tabular::{CsvMatrixReader, CsvResultWriter, XlsxMatrixReader};

    const PHONES: &str = "\
Model,Price,Storage,Camera,Looks
A,250,16,12,5
B,200,16,8,3
C,300,32,16,4
D,275,32,8,4
";

    struct Fixture {
        handler: RankAlternativesHandler,
        store: InMemoryResultStore,
        delivery: InMemoryDelivery,
    }

    fn fixture_with(delivery: InMemoryDelivery) -> Fixture {
        let store = InMemoryResultStore::new();
        let handler = RankAlternativesHandler::new(
            vec![
                Arc::new(CsvMatrixReader::new()),
                Arc::new(XlsxMatrixReader::new()),
            ],
            Arc::new(CsvResultWriter::new()),
            Arc::new(store.clone()),
            Arc::new(delivery.clone()),
        );
        Fixture {
            handler,
            store,
            delivery,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(InMemoryDelivery::new())
    }

    fn command() -> RankAlternativesCommand {
        RankAlternativesCommand {
            filename: "phones.csv".to_string(),
            content: PHONES.as_bytes().to_vec(),
            weights: "1,1,1,1".to_string(),
            impacts: "-,+,+,+".to_string(),
            recipient: None,
            output_name: None,
        }
    }

    #[tokio::test]
    async fn ranks_and_stores_result() {
        let f = fixture();

        let result = f.handler.handle(command()).await.unwrap();

        let ranks: Vec<u32> = result.evaluation.ranking.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![3, 4, 1, 2]);
        assert_eq!(result.stored.name, "result_phones.csv");
        assert_eq!(result.delivery, DeliveryStatus::NotRequested);

        let stored = f.store.load("result_phones.csv").await.unwrap();
        let text = String::from_utf8(stored).unwrap();
        assert!(text.starts_with("Model,Price,Storage,Camera,Looks,Topsis Score,Rank\n"));
    }

    #[tokio::test]
    async fn output_name_overrides_derived_name() {
        let f = fixture();
        let cmd = RankAlternativesCommand {
            output_name: Some("ranked.csv".to_string()),
            ..command()
        };

        let result = f.handler.handle(cmd).await.unwrap();

        assert_eq!(result.stored.name, "ranked.csv");
        assert!(f.store.load("ranked.csv").await.is_ok());
    }

    #[tokio::test]
    async fn delivers_to_recipient() {
        let f = fixture();
        let cmd = RankAlternativesCommand {
            recipient: Some("user@example.com".to_string()),
            ..command()
        };

        let result = f.handler.handle(cmd).await.unwrap();

        assert_eq!(
            result.delivery,
            DeliveryStatus::Delivered {
                recipient: "user@example.com".to_string()
            }
        );
        let sent = f.delivery.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].attachment.filename, "result_phones.csv");
        assert_eq!(sent[0].attachment.content_type, "text/csv");
    }

    #[tokio::test]
    async fn blank_recipient_is_not_requested() {
        let f = fixture();
        let cmd = RankAlternativesCommand {
            recipient: Some("   ".to_string()),
            ..command()
        };

        let result = f.handler.handle(cmd).await.unwrap();

        assert_eq!(result.delivery, DeliveryStatus::NotRequested);
    }

    #[tokio::test]
    async fn delivery_failure_still_succeeds() {
        let f = fixture_with(InMemoryDelivery::failing("mailbox full"));
        let cmd = RankAlternativesCommand {
            recipient: Some("user@example.com".to_string()),
            ..command()
        };

        let result = f.handler.handle(cmd).await.unwrap();

        assert!(matches!(result.delivery, DeliveryStatus::Failed { .. }));
        assert!(result.delivery.warning().unwrap().contains("mailbox full"));
        assert!(f.store.load("result_phones.csv").await.is_ok());
    }

    #[tokio::test]
    async fn invalid_recipient_rejects_before_storing() {
        let f = fixture();
        let cmd = RankAlternativesCommand {
            recipient: Some("not-an-address".to_string()),
            ..command()
        };

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidRecipient);
        assert!(f.store.is_empty().await);
    }

    #[tokio::test]
    async fn unsupported_format_is_rejected() {
        let f = fixture();
        let cmd = RankAlternativesCommand {
            filename: "phones.ods".to_string(),
            ..command()
        };

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::UnsupportedFormat);
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn shape_mismatch_aborts_without_output() {
        let f = fixture();
        let cmd = RankAlternativesCommand {
            weights: "1,1,1".to_string(),
            ..command()
        };

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::ShapeMismatch);
        assert!(f.store.is_empty().await);
        assert!(f.delivery.sent().is_empty());
    }

    #[tokio::test]
    async fn invalid_impact_marker_is_rejected() {
        let f = fixture();
        let cmd = RankAlternativesCommand {
            impacts: "+,+,*,+".to_string(),
            ..command()
        };

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidImpact);
    }

    #[tokio::test]
    async fn non_numeric_column_is_rejected() {
        let f = fixture();
        let cmd = RankAlternativesCommand {
            content: b"Model,Price,Looks\nA,cheap,5\n".to_vec(),
            weights: "1,1".to_string(),
            impacts: "-,+".to_string(),
            ..command()
        };

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::NonNumericColumn);
    }

    #[test]
    fn storage_io_is_server_error() {
        let err = RankError::from(StorageError::io("disk full"));
        assert!(!err.is_client_error());
        assert_eq!(err.code(), ErrorCode::StorageError);
    }
}
