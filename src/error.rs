use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error for '{key}': {message}")]
    Storage { key: String, message: String },

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Ingestion trigger failed: {0}")]
    Trigger(String),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
