pub mod config;
pub mod constants;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod fallback;
pub mod logging;
pub mod observability;
pub mod pipeline;

// Application use cases and the ports they depend on
pub mod app;
pub mod infra;

pub use pipeline::processing::normalize::{clean_document, clean_document_text, CleaningStrategy};
