use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, info_span, warn, Instrument};

use crate::app::ports::{IngestionTriggerPort, ObjectMetadata, ObjectStorePort, TextExtractorPort};
use crate::config::Config;
use crate::constants;
use crate::domain::{DocumentKind, RawDocument};
use crate::envelope::{HandlerResponse, UploadNotification, UploadRecord};
use crate::observability::metrics;
use crate::pipeline::processing::normalize::{clean_document, CleaningStrategy};

/// Why an uploaded object produced no cleaned output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyProcessed,
    OutsideSourcePrefix,
    Folder,
    /// Word documents are left for the knowledge base to ingest as uploaded
    LeftForKnowledgeBase,
    UnsupportedType(String),
    EmptyOutput,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::AlreadyProcessed => "already_processed",
            SkipReason::OutsideSourcePrefix => "outside_source_prefix",
            SkipReason::Folder => "folder",
            SkipReason::LeftForKnowledgeBase => "left_for_knowledge_base",
            SkipReason::UnsupportedType(_) => "unsupported_type",
            SkipReason::EmptyOutput => "empty_output",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedType(ext) => write!(f, "unsupported file type: {}", ext),
            other => f.write_str(other.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RecordOutcome {
    Processed(String),
    Skipped(SkipReason),
}

/// Summary of one notification batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed_files: Vec<String>,
    pub skipped: Vec<(String, SkipReason)>,
    pub failed: Vec<String>,
    pub ingestion_job_id: Option<String>,
}

/// Use case for cleaning a batch of uploaded documents and re-indexing the knowledge base
pub struct ProcessDocumentsUseCase {
    store: Arc<dyn ObjectStorePort>,
    extractor: Arc<dyn TextExtractorPort>,
    trigger: Arc<dyn IngestionTriggerPort>,
    config: Config,
}

impl ProcessDocumentsUseCase {
    pub fn new(
        store: Arc<dyn ObjectStorePort>,
        extractor: Arc<dyn TextExtractorPort>,
        trigger: Arc<dyn IngestionTriggerPort>,
        config: Config,
    ) -> Self {
        Self {
            store,
            extractor,
            trigger,
            config,
        }
    }

    /// Process a notification and map the result to the trigger's response shape.
    pub async fn handle(&self, notification: &UploadNotification) -> Result<HandlerResponse> {
        let response = match self.process_notification(notification).await {
            Ok(report) if report.processed_files.is_empty() => HandlerResponse::nothing_processed()?,
            Ok(report) => HandlerResponse::processed(report.processed_files)?,
            Err(e) => {
                error!("Error processing documents: {:#}", e);
                HandlerResponse::error(&format!("{:#}", e))?
            }
        };
        Ok(response)
    }

    /// Clean every eligible record in order, then request one sync if anything was written.
    /// A failing document is logged and counted; it never stops the rest of the batch.
    pub async fn process_notification(&self, notification: &UploadNotification) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for record in &notification.records {
            let key = record.key().to_string();
            let span = info_span!("document", key = %key);

            match self.process_record(record).instrument(span).await {
                Ok(RecordOutcome::Processed(processed_key)) => {
                    info!("Processed and saved: {}", processed_key);
                    report.processed_files.push(processed_key);
                }
                Ok(RecordOutcome::Skipped(reason)) => {
                    metrics::documents::skipped(reason.as_str());
                    report.skipped.push((key, reason));
                }
                Err(e) => {
                    error!("Error processing {}: {:#}", key, e);
                    metrics::documents::failed();
                    report.failed.push(key);
                }
            }
        }

        if report.processed_files.is_empty() {
            info!("No files processed");
            return Ok(report);
        }

        if self.config.sync_delay_seconds > 0 {
            info!("Waiting {} seconds before triggering sync...", self.config.sync_delay_seconds);
            tokio::time::sleep(Duration::from_secs(self.config.sync_delay_seconds)).await;
        }

        report.ingestion_job_id = Some(self.trigger_sync().await?);
        Ok(report)
    }

    async fn process_record(&self, record: &UploadRecord) -> Result<RecordOutcome> {
        let key = record.key();
        info!("Processing file: {}", key);

        if let Some(reason) = self.skip_reason(key) {
            info!("Skipping {}: {}", key, reason);
            return Ok(RecordOutcome::Skipped(reason));
        }

        let raw_text = match self.extract_raw_text(record.bucket(), key).await? {
            Ok(text) => text,
            Err(reason) => {
                warn!("Could not process file {}: {}", key, reason);
                return Ok(RecordOutcome::Skipped(reason));
            }
        };

        let strategy = CleaningStrategy::for_filename(key);
        let cleaned = clean_document(&RawDocument::new(key, raw_text));
        if cleaned.text.is_empty() {
            warn!("Could not process file {}: cleaned text is empty", key);
            return Ok(RecordOutcome::Skipped(SkipReason::EmptyOutput));
        }
        metrics::documents::cleaned(strategy.as_str(), cleaned.text.len());

        let processed_key = processed_key(&self.config.processed_prefix, key);
        let metadata = provenance_metadata(key, Utc::now().naive_utc());
        self.store
            .put_object(
                record.bucket(),
                &processed_key,
                cleaned.text.into_bytes(),
                constants::PROCESSED_CONTENT_TYPE,
                metadata,
            )
            .await
            .with_context(|| format!("Failed to save processed text to {}", processed_key))?;

        Ok(RecordOutcome::Processed(processed_key))
    }

    fn skip_reason(&self, key: &str) -> Option<SkipReason> {
        if key.starts_with(&self.config.processed_prefix) {
            Some(SkipReason::AlreadyProcessed)
        } else if !key.starts_with(&self.config.source_prefix) {
            Some(SkipReason::OutsideSourcePrefix)
        } else if key.ends_with('/') {
            Some(SkipReason::Folder)
        } else {
            None
        }
    }

    /// Outer error: extraction failed. Inner error: the document yields no text by design.
    async fn extract_raw_text(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<std::result::Result<String, SkipReason>> {
        match DocumentKind::from_key(key) {
            DocumentKind::Pdf => {
                info!("Extracting text from PDF: {}", key);
                let lines = self
                    .extractor
                    .detect_document_text(bucket, key)
                    .await
                    .with_context(|| format!("Error processing PDF {}", key))?;
                Ok(Ok(lines.join("\n")))
            }
            DocumentKind::Text => {
                let bytes = self
                    .store
                    .get_object(bucket, key)
                    .await
                    .with_context(|| format!("Error reading text file {}", key))?;
                let text = String::from_utf8(bytes)
                    .with_context(|| format!("Text file {} is not valid UTF-8", key))?;
                Ok(Ok(text))
            }
            DocumentKind::Word => {
                info!("Word document {} will be ingested by the knowledge base directly", key);
                Ok(Err(SkipReason::LeftForKnowledgeBase))
            }
            DocumentKind::Unsupported(ext) => Ok(Err(SkipReason::UnsupportedType(ext))),
        }
    }

    async fn trigger_sync(&self) -> Result<String> {
        info!(
            "Triggering Knowledge Base sync for KB: {}, DS: {}",
            self.config.knowledge_base_id, self.config.data_source_id
        );
        match self
            .trigger
            .start_ingestion_job(&self.config.knowledge_base_id, &self.config.data_source_id)
            .await
        {
            Ok(job_id) => {
                metrics::ingestion::triggered();
                info!("Knowledge Base sync started with job ID: {}", job_id);
                Ok(job_id)
            }
            Err(e) => {
                metrics::ingestion::failed();
                error!("Error triggering sync: {}", e);
                Err(anyhow::Error::new(e).context("Failed to trigger knowledge base sync"))
            }
        }
    }
}

/// `<prefix><stem>_processed.txt`, where the stem is the last path segment minus its final extension.
pub fn processed_key(processed_prefix: &str, original_key: &str) -> String {
    let filename = original_key.rsplit('/').next().unwrap_or(original_key);
    let stem = filename.rsplit_once('.').map(|(stem, _)| stem).unwrap_or("");
    format!("{}{}{}", processed_prefix, stem, constants::PROCESSED_SUFFIX)
}

/// Provenance attached to every processed object. Metadata keys cannot carry `/`.
pub fn provenance_metadata(original_key: &str, processed_at: NaiveDateTime) -> ObjectMetadata {
    let mut metadata = ObjectMetadata::new();
    metadata.insert(
        constants::META_ORIGINAL_FILE.to_string(),
        original_key.replace('/', "-"),
    );
    metadata.insert(
        constants::META_PROCESSED_DATE.to_string(),
        processed_at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
    );
    metadata.insert(constants::META_PROCESSOR.to_string(), constants::PROCESSOR_ID.to_string());
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProcessorError, Result as PortResult};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockStore {
        objects: tokio::sync::Mutex<HashMap<String, Vec<u8>>>,
        written: tokio::sync::Mutex<Vec<(String, String, ObjectMetadata)>>,
        fail_puts: bool,
    }

    #[async_trait]
    impl ObjectStorePort for MockStore {
        async fn get_object(&self, _bucket: &str, key: &str) -> PortResult<Vec<u8>> {
            self.objects.lock().await.get(key).cloned().ok_or_else(|| ProcessorError::Storage {
                key: key.to_string(),
                message: "no such key".to_string(),
            })
        }

        async fn put_object(
            &self,
            _bucket: &str,
            key: &str,
            body: Vec<u8>,
            _content_type: &str,
            metadata: ObjectMetadata,
        ) -> PortResult<String> {
            if self.fail_puts {
                return Err(ProcessorError::Storage {
                    key: key.to_string(),
                    message: "access denied".to_string(),
                });
            }
            let text = String::from_utf8(body)?;
            self.written.lock().await.push((key.to_string(), text, metadata));
            Ok("etag".to_string())
        }
    }

    struct MockOcr {
        lines: Vec<String>,
    }

    #[async_trait]
    impl TextExtractorPort for MockOcr {
        async fn detect_document_text(&self, _bucket: &str, key: &str) -> PortResult<Vec<String>> {
            if key.contains("broken") {
                return Err(ProcessorError::Extraction("unsupported document format".to_string()));
            }
            Ok(self.lines.clone())
        }
    }

    #[derive(Default)]
    struct MockTrigger {
        calls: tokio::sync::Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl IngestionTriggerPort for MockTrigger {
        async fn start_ingestion_job(&self, kb: &str, ds: &str) -> PortResult<String> {
            if self.fail {
                return Err(ProcessorError::Trigger("throttled".to_string()));
            }
            self.calls.lock().await.push((kb.to_string(), ds.to_string()));
            Ok("job-1".to_string())
        }
    }

    fn config() -> Config {
        Config {
            sync_delay_seconds: 0,
            ..Config::default()
        }
    }

    fn notification(keys: &[&str]) -> UploadNotification {
        UploadNotification {
            records: keys.iter().map(|k| UploadRecord::new("school-qa-docs-v2", k)).collect(),
        }
    }

    fn use_case(
        store: Arc<MockStore>,
        trigger: Arc<MockTrigger>,
    ) -> ProcessDocumentsUseCase {
        let ocr = Arc::new(MockOcr {
            lines: vec![
                "September 2025".to_string(),
                "Key: SH = School Hall".to_string(),
                "Monday 8th: Sports day at 15:00 SH".to_string(),
            ],
        });
        ProcessDocumentsUseCase::new(store, ocr, trigger, config())
    }

    #[test]
    fn test_processed_key_naming() {
        assert_eq!(
            processed_key("processed-docs/", "school-docs/term/calendar.2025.pdf"),
            "processed-docs/calendar.2025_processed.txt"
        );
        assert_eq!(processed_key("processed-docs/", "school-docs/README"), "processed-docs/_processed.txt");
    }

    #[test]
    fn test_provenance_metadata() {
        let at = NaiveDate::from_ymd_opt(2025, 9, 1)
            .unwrap()
            .and_hms_micro_opt(8, 30, 0, 120)
            .unwrap();
        let metadata = provenance_metadata("school-docs/calendar.pdf", at);
        assert_eq!(metadata["original-file"], "school-docs-calendar.pdf");
        assert_eq!(metadata["processed-date"], "2025-09-01T08:30:00.000120");
        assert_eq!(metadata["processor"], "document-processor-lambda");
    }

    #[tokio::test]
    async fn test_calendar_pdf_is_cleaned_saved_and_synced() {
        let store = Arc::new(MockStore::default());
        let trigger = Arc::new(MockTrigger::default());
        let uc = use_case(store.clone(), trigger.clone());

        let report = uc
            .process_notification(&notification(&["school-docs/calendar.pdf"]))
            .await
            .unwrap();

        assert_eq!(report.processed_files, vec!["processed-docs/calendar_processed.txt"]);
        assert_eq!(report.ingestion_job_id.as_deref(), Some("job-1"));

        let written = store.written.lock().await;
        assert_eq!(written.len(), 1);
        assert!(written[0]
            .1
            .contains("Monday 8th September 2025: Sports day at 3:00pm, School Hall"));
        assert_eq!(
            trigger.calls.lock().await.as_slice(),
            &[("D5MRCKWCTD".to_string(), "T4PVH55UXI".to_string())]
        );
    }

    #[tokio::test]
    async fn test_skips_do_not_trigger_sync() {
        let store = Arc::new(MockStore::default());
        let trigger = Arc::new(MockTrigger::default());
        let uc = use_case(store.clone(), trigger.clone());

        let report = uc
            .process_notification(&notification(&[
                "processed-docs/calendar_processed.txt",
                "other/calendar.pdf",
                "school-docs/term/",
                "school-docs/policy.docx",
                "school-docs/photo.png",
            ]))
            .await
            .unwrap();

        let reasons: Vec<SkipReason> = report.skipped.into_iter().map(|(_, r)| r).collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::AlreadyProcessed,
                SkipReason::OutsideSourcePrefix,
                SkipReason::Folder,
                SkipReason::LeftForKnowledgeBase,
                SkipReason::UnsupportedType("png".to_string()),
            ]
        );
        assert!(trigger.calls.lock().await.is_empty());
        assert_eq!(report.ingestion_job_id, None);
    }

    #[tokio::test]
    async fn test_failed_document_does_not_stop_batch() {
        let store = Arc::new(MockStore::default());
        store
            .objects
            .lock()
            .await
            .insert("school-docs/letter.txt".to_string(), b"Dear parents,\n\n  Trip  on Friday.".to_vec());
        store
            .objects
            .lock()
            .await
            .insert("school-docs/bad.txt".to_string(), vec![0xff, 0xfe, 0x00]);
        let trigger = Arc::new(MockTrigger::default());
        let uc = use_case(store.clone(), trigger.clone());

        let report = uc
            .process_notification(&notification(&[
                "school-docs/broken.pdf",
                "school-docs/bad.txt",
                "school-docs/missing.txt",
                "school-docs/letter.txt",
            ]))
            .await
            .unwrap();

        assert_eq!(
            report.failed,
            vec!["school-docs/broken.pdf", "school-docs/bad.txt", "school-docs/missing.txt"]
        );
        assert_eq!(report.processed_files, vec!["processed-docs/letter_processed.txt"]);
        assert_eq!(store.written.lock().await[0].1, "Dear parents, Trip on Friday.");
        assert_eq!(trigger.calls.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_output_is_not_processed() {
        let store = Arc::new(MockStore::default());
        store
            .objects
            .lock()
            .await
            .insert("school-docs/blank.txt".to_string(), b"  \n\n ".to_vec());
        let trigger = Arc::new(MockTrigger::default());
        let uc = use_case(store, trigger.clone());

        let response = uc.handle(&notification(&["school-docs/blank.txt"])).await.unwrap();
        assert_eq!(response, HandlerResponse::nothing_processed().unwrap());
        assert!(trigger.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_failure_is_per_document() {
        let store = Arc::new(MockStore {
            fail_puts: true,
            ..MockStore::default()
        });
        let trigger = Arc::new(MockTrigger::default());
        let uc = use_case(store, trigger.clone());

        let report = uc
            .process_notification(&notification(&["school-docs/calendar.pdf"]))
            .await
            .unwrap();
        assert_eq!(report.failed, vec!["school-docs/calendar.pdf"]);
        assert!(trigger.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_trigger_failure_is_500() {
        let store = Arc::new(MockStore::default());
        let trigger = Arc::new(MockTrigger {
            fail: true,
            ..MockTrigger::default()
        });
        let uc = use_case(store, trigger);

        let response = uc.handle(&notification(&["school-docs/calendar.pdf"])).await.unwrap();
        assert_eq!(response.status_code, 500);
        assert!(response.body.contains("throttled"));
    }
}
