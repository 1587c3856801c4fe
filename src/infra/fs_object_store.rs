use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::ports::{ObjectMetadata, ObjectStorePort};
use crate::constants::METADATA_SIDECAR_SUFFIX;
use crate::error::{ProcessorError, Result};

/// Sidecar written next to every stored object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredObjectMeta {
    pub content_type: String,
    pub etag: String,
    pub size_bytes: u64,
    pub metadata: ObjectMetadata,
}

/// Object store backed by a local directory: `<root>/<bucket>/<key>`.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key under its bucket directory, rejecting keys that escape it.
    pub fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        let escapes = key
            .split('/')
            .any(|segment| segment == ".." || segment == ".");
        if key.is_empty() || key.starts_with('/') || escapes || bucket.contains('/') {
            return Err(ProcessorError::Storage {
                key: key.to_string(),
                message: "invalid object key".to_string(),
            });
        }
        Ok(self.root.join(bucket).join(key))
    }

    pub async fn head_object(&self, bucket: &str, key: &str) -> Result<StoredObjectMeta> {
        let path = sidecar_path(&self.object_path(bucket, key)?);
        let bytes = tokio::fs::read(&path).await.map_err(|e| storage_error(key, e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn sidecar_path(object_path: &Path) -> PathBuf {
    let mut name = object_path.as_os_str().to_owned();
    name.push(METADATA_SIDECAR_SUFFIX);
    PathBuf::from(name)
}

fn storage_error(key: &str, e: std::io::Error) -> ProcessorError {
    ProcessorError::Storage {
        key: key.to_string(),
        message: e.to_string(),
    }
}

#[async_trait]
impl ObjectStorePort for FsObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let path = self.object_path(bucket, key)?;
        tokio::fs::read(&path).await.map_err(|e| storage_error(key, e))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
        metadata: ObjectMetadata,
    ) -> Result<String> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let etag = hex::encode(Sha256::digest(&body));
        let meta = StoredObjectMeta {
            content_type: content_type.to_string(),
            etag: etag.clone(),
            size_bytes: body.len() as u64,
            metadata,
        };

        tokio::fs::write(&path, &body).await.map_err(|e| storage_error(key, e))?;
        tokio::fs::write(sidecar_path(&path), serde_json::to_vec_pretty(&meta)?)
            .await
            .map_err(|e| storage_error(key, e))?;

        debug!("Stored {} ({} bytes) at {}", key, body.len(), path.display());
        Ok(etag)
    }
}
