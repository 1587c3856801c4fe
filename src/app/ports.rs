use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::error::Result;

/// Object metadata stored alongside the object body.
pub type ObjectMetadata = BTreeMap<String, String>;

/// Bucket/key object storage holding uploads and cleaned output.
#[async_trait]
pub trait ObjectStorePort: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Store `body` under `key`, returning the stored object's ETag.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
        metadata: ObjectMetadata,
    ) -> Result<String>;
}

/// OCR over a stored document, returning detected lines in reading order.
#[async_trait]
pub trait TextExtractorPort: Send + Sync {
    async fn detect_document_text(&self, bucket: &str, key: &str) -> Result<Vec<String>>;
}

/// Knowledge base re-indexing request.
#[async_trait]
pub trait IngestionTriggerPort: Send + Sync {
    /// Start an ingestion job and return its identifier.
    async fn start_ingestion_job(&self, knowledge_base_id: &str, data_source_id: &str) -> Result<String>;
}
