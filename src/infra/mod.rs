// Local adapters for the application ports
pub mod fs_object_store;
pub mod ingestion_trigger;
pub mod ocr_sidecar;

pub use fs_object_store::FsObjectStore;
pub use ingestion_trigger::FileIngestionTrigger;
pub use ocr_sidecar::SidecarOcrExtractor;
