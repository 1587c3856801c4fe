use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::app::ports::IngestionTriggerPort;
use crate::error::{ProcessorError, Result};

/// One requested knowledge base ingestion job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestionJobRecord {
    pub ingestion_job_id: String,
    pub knowledge_base_id: String,
    pub data_source_id: String,
    pub started_at: DateTime<Utc>,
}

/// Records ingestion requests in an append-only NDJSON log.
pub struct FileIngestionTrigger {
    log_path: PathBuf,
}

impl FileIngestionTrigger {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    pub async fn read_jobs(&self) -> Result<Vec<IngestionJobRecord>> {
        let content = match tokio::fs::read_to_string(&self.log_path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).map_err(ProcessorError::from))
            .collect()
    }
}

#[async_trait]
impl IngestionTriggerPort for FileIngestionTrigger {
    async fn start_ingestion_job(&self, knowledge_base_id: &str, data_source_id: &str) -> Result<String> {
        if knowledge_base_id.is_empty() || data_source_id.is_empty() {
            return Err(ProcessorError::Trigger(
                "knowledge base and data source ids are required".to_string(),
            ));
        }

        let record = IngestionJobRecord {
            ingestion_job_id: Uuid::new_v4().to_string(),
            knowledge_base_id: knowledge_base_id.to_string(),
            data_source_id: data_source_id.to_string(),
            started_at: Utc::now(),
        };

        if let Some(parent) = self.log_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .await?;
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(record.ingestion_job_id)
    }
}
