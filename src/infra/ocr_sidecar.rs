use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app::ports::{ObjectStorePort, TextExtractorPort};
use crate::constants::OCR_SIDECAR_SUFFIX;
use crate::error::{ProcessorError, Result};

/// Response of a text-detection call: page, line and word blocks in reading order.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DetectDocumentTextResponse {
    #[serde(rename = "Blocks", default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "BlockType")]
    pub block_type: String,
    #[serde(rename = "Text", default)]
    pub text: Option<String>,
}

impl DetectDocumentTextResponse {
    /// Text of every LINE block, in order. Line blocks without text are skipped.
    pub fn line_texts(&self) -> Vec<String> {
        self.blocks
            .iter()
            .filter(|b| b.block_type == "LINE")
            .filter_map(|b| b.text.clone())
            .collect()
    }
}

/// Reads OCR results stored next to the document as `<key>.textract.json`.
pub struct SidecarOcrExtractor {
    store: Arc<dyn ObjectStorePort>,
}

impl SidecarOcrExtractor {
    pub fn new(store: Arc<dyn ObjectStorePort>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TextExtractorPort for SidecarOcrExtractor {
    async fn detect_document_text(&self, bucket: &str, key: &str) -> Result<Vec<String>> {
        let sidecar_key = format!("{}{}", key, OCR_SIDECAR_SUFFIX);
        let bytes = self.store.get_object(bucket, &sidecar_key).await.map_err(|e| {
            ProcessorError::Extraction(format!("no OCR result for {}: {}", key, e))
        })?;
        let response: DetectDocumentTextResponse = serde_json::from_slice(&bytes)?;
        Ok(response.line_texts())
    }
}
