use serde::{Deserialize, Serialize};

/// Object-created notification delivered for a batch of uploads.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UploadNotification {
    #[serde(rename = "Records", default)]
    pub records: Vec<UploadRecord>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadRecord {
    pub s3: StorageEntity,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageEntity {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ObjectRef {
    pub key: String,
}

impl UploadRecord {
    pub fn new(bucket: &str, key: &str) -> Self {
        Self {
            s3: StorageEntity {
                bucket: BucketRef { name: bucket.to_string() },
                object: ObjectRef { key: key.to_string() },
            },
        }
    }

    pub fn bucket(&self) -> &str {
        &self.s3.bucket.name
    }

    pub fn key(&self) -> &str {
        &self.s3.object.key
    }
}

/// Status and JSON body reported back to the trigger that delivered the batch.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProcessedBody {
    pub message: String,
    pub processed_files: Vec<String>,
}

impl HandlerResponse {
    pub fn processed(processed_files: Vec<String>) -> serde_json::Result<Self> {
        let body = ProcessedBody {
            message: "Documents processed and sync triggered".to_string(),
            processed_files,
        };
        Ok(Self {
            status_code: 200,
            body: serde_json::to_string(&body)?,
        })
    }

    pub fn nothing_processed() -> serde_json::Result<Self> {
        Ok(Self {
            status_code: 200,
            body: serde_json::to_string("No files processed")?,
        })
    }

    pub fn error(message: &str) -> serde_json::Result<Self> {
        Ok(Self {
            status_code: 500,
            body: serde_json::to_string(&format!("Error: {}", message))?,
        })
    }
}
