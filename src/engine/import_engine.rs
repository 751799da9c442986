use crate::engine::{DuplicateDetector, DuplicatePolicy, ImportConfig, Persister};
use crate::models::{CandidateDeal, DealRecord, EngineError, ImportError, Rejection, StructuralError};
use crate::parser::{raw_payload, RecordParser};
use crate::storage::{DealStore, ErrorStore};
use crate::validation::Validator;
use csv::{Position, Reader, ReaderBuilder, StringRecord, Trim};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufReader, Read};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error, info, warn};

/// Final tally of one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows_succeeded: u64,
    pub rows_failed: u64
}

impl Display for ImportSummary {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "Successful: {}, Failed: {}", self.rows_succeeded, self.rows_failed)
    }
}

/// One record as read from the source, tagged with its line.
struct SourceRow {
    line: u64,
    record: Result<StringRecord, csv::Error>
}

enum RowOutcome {
    Committed(DealRecord),
    Rejected(ImportError)
}

/// The per-row stages, wired to the stores for the duration of one run.
struct RowPipeline<'a, D: DealStore> {
    parser: RecordParser,
    validator: Validator,
    detector: DuplicateDetector<'a, D>,
    persister: Persister<'a, D>
}

impl<D: DealStore> RowPipeline<'_, D> {
    fn process(&self, row: SourceRow) -> RowOutcome {
        let record = match row.record {
            Ok(record) => record,
            Err(error) => {
                let cause = StructuralError::Unreadable(error.to_string());
                return RowOutcome::Rejected(ImportError::structural(row.line, String::new(), &cause));
            }
        };

        let candidate = match self.parser.parse(row.line, &record) {
            Ok(candidate) => candidate,
            Err(error) => return RowOutcome::Rejected(ImportError::structural(row.line, raw_payload(&record), &error))
        };

        match self.accept(&candidate) {
            Ok(deal) => RowOutcome::Committed(deal),
            Err(rejection) => RowOutcome::Rejected(ImportError::from_candidate(&candidate, rejection))
        }
    }

    fn accept(&self, candidate: &CandidateDeal) -> Result<DealRecord, Rejection> {
        let deal = self.validator.validate(candidate)?;
        self.detector.check(&deal)?;
        self.persister.commit(deal)
    }
}

/// Drives a tabular deal source through parse, validate, dedupe and persist.
///
/// Rows are handled one at a time in source order so each duplicate check sees every
/// deal committed before it. Only a source that cannot be opened aborts a run; every
/// row-level failure is written to the error store and counted.
pub struct ImportEngine<D: DealStore, E: ErrorStore> {
    deal_store: Arc<D>,
    error_store: Arc<E>,
    config: ImportConfig
}

impl<D: DealStore, E: ErrorStore> ImportEngine<D, E> {
    /// Creates a new engine over the provided stores with the default configuration.
    pub fn new(deal_store: Arc<D>, error_store: Arc<E>) -> Self {
        Self {
            deal_store,
            error_store,
            config: ImportConfig::default()
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.config.duplicate_policy = policy;
        self
    }

    pub fn with_error_suppression(mut self, enabled: bool) -> Self {
        self.config.suppress_repeated_errors = enabled;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.config.channel_capacity = capacity.max(1);
        self
    }

    /// Imports every row of the CSV file at `path`.
    ///
    /// # Errors
    /// `EngineError::SourceUnavailable` if the file cannot be opened or its header read.
    /// No row is processed and neither store is touched in that case.
    pub async fn run(&self, path: &str) -> Result<ImportSummary, EngineError> {
        let owned_path = path.to_string();

        self.import(path, move || {
            let file = File::open(&owned_path).map_err(|error| {
                error!("Error opening CSV at path: {owned_path} | {error}");
                error
            })?;

            open_csv(file)
        }).await
    }

    /// Imports every row of an already opened source. `source_name` is only used for logging.
    pub async fn run_reader<R: Read + Send + 'static>(&self, source_name: &str, source: R) -> Result<ImportSummary, EngineError> {
        self.import(source_name, move || open_csv(source)).await
    }

    async fn import<R, F>(&self, source_name: &str, open: F) -> Result<ImportSummary, EngineError>
    where
        R: Read + Send + 'static,
        F: FnOnce() -> Result<(Reader<BufReader<R>>, StringRecord), csv::Error> + Send + 'static,
    {
        info!("Starting CSV import from [{source_name}]");

        let (reader, headers) = spawn_blocking(open).await
            .map_err(|error| EngineError::source_unavailable(source_name, error))?
            .map_err(|error| {
                error!("Failed to open CSV source [{source_name}]: {error}");
                EngineError::source_unavailable(source_name, error)
            })?;

        let (sender, receiver) = mpsc::channel::<SourceRow>(self.config.channel_capacity);
        let csv_handle = spawn_csv_reader(reader, sender);
        let summary = self.process_rows(RecordParser::from_headers(&headers), receiver).await;

        if let Err(error) = csv_handle.await {
            error!("CSV ingestion failed: {error}");
        }

        info!("CSV import of [{source_name}] completed. {summary}");

        Ok(summary)
    }

    async fn process_rows(&self, parser: RecordParser, mut receiver: mpsc::Receiver<SourceRow>) -> ImportSummary {
        let pipeline = RowPipeline {
            parser,
            validator: Validator::new(),
            detector: DuplicateDetector::new(self.deal_store.as_ref(), self.config.duplicate_policy),
            persister: Persister::new(self.deal_store.as_ref())
        };

        let mut summary = ImportSummary::default();

        while let Some(row) = receiver.recv().await {
            match pipeline.process(row) {
                RowOutcome::Committed(deal) => {
                    debug!("Successfully saved deal [{}]", deal.deal_id);
                    summary.rows_succeeded += 1;
                }
                RowOutcome::Rejected(import_error) => {
                    self.record_error(import_error);
                    summary.rows_failed += 1;
                }
            }
        }

        summary
    }

    fn record_error(&self, import_error: ImportError) {
        let deal_id = import_error.deal_id.clone().unwrap_or_default();
        let line = import_error.line;

        warn!("Rejected line [{line}] deal [{deal_id}]: {} {}", import_error.reason, import_error.detail.as_deref().unwrap_or_default());

        if self.config.suppress_repeated_errors && !deal_id.is_empty() {
            match self.error_store.exists(&deal_id) {
                Ok(true) => {
                    debug!("Error for deal [{deal_id}] already recorded, skipping line [{line}]");
                    return;
                }
                Ok(false) => {}
                Err(error) => error!("Could not check recorded errors for deal [{deal_id}]: {error}")
            }
        }

        if let Err(error) = self.error_store.save(import_error) {
            error!("Failed to save import error for line [{line}] deal [{deal_id}]: {error}");
        }
    }
}

fn open_csv<R: Read>(source: R) -> Result<(Reader<BufReader<R>>, StringRecord), csv::Error> {
    //NOTE: Fields are trimmed by the parser so the error log can keep the raw values
    let mut reader = ReaderBuilder::new()
        .trim(Trim::None)
        .flexible(true)
        .from_reader(BufReader::new(source));

    let headers = reader.headers()?.clone();

    Ok((reader, headers))
}

fn spawn_csv_reader<R: Read + Send + 'static>(mut reader: Reader<BufReader<R>>, sender: mpsc::Sender<SourceRow>) -> JoinHandle<()> {
    spawn_blocking(move || {
        let mut last_line = 1;

        for result in reader.records() {
            let position = match &result {
                Ok(record) => record.position(),
                Err(error) => error.position()
            };
            let line = position.map(Position::line).unwrap_or(last_line + 1);
            let is_io_error = matches!(&result, Err(error) if error.is_io_error());

            last_line = line;

            if sender.blocking_send(SourceRow { line, record: result }).is_err() {
                break;
            }

            if is_io_error {
                error!("CSV source failed at line [{line}], stopping ingestion");
                break;
            }
        }
    })
}
