/// Defaults and fixed names shared by the config layer and the batch use case.

// Storage layout
pub const DEFAULT_STORE_ROOT: &str = "data";
pub const DEFAULT_SOURCE_BUCKET: &str = "school-qa-docs-v2";
pub const DEFAULT_SOURCE_PREFIX: &str = "school-docs/";
pub const DEFAULT_PROCESSED_PREFIX: &str = "processed-docs/";
pub const DEFAULT_JOBS_LOG: &str = "data/ingestion_jobs.ndjson";

// Knowledge base sync
pub const DEFAULT_KNOWLEDGE_BASE_ID: &str = "D5MRCKWCTD";
pub const DEFAULT_DATA_SOURCE_ID: &str = "T4PVH55UXI";
pub const DEFAULT_SYNC_DELAY_SECONDS: u64 = 60;

// Processed output naming and provenance
pub const PROCESSED_SUFFIX: &str = "_processed.txt";
pub const PROCESSED_CONTENT_TYPE: &str = "text/plain";
pub const PROCESSOR_ID: &str = "document-processor-lambda";
pub const META_ORIGINAL_FILE: &str = "original-file";
pub const META_PROCESSED_DATE: &str = "processed-date";
pub const META_PROCESSOR: &str = "processor";

// Sidecar files used by the local adapters
pub const METADATA_SIDECAR_SUFFIX: &str = ".metadata.json";
pub const OCR_SIDECAR_SUFFIX: &str = ".textract.json";
