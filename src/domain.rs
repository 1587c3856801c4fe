use serde::{Deserialize, Serialize};

/// Text extracted from one uploaded file, before cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    pub filename: String,
    pub raw_text: String,
}

impl RawDocument {
    pub fn new(filename: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// Cleaned text ready for the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedDocument {
    pub text: String,
}

/// How an uploaded file is turned into raw text, decided by its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    /// Scanned or exported PDF, read through OCR
    Pdf,
    /// Word documents are ingested by the knowledge base directly
    Word,
    /// Plain UTF-8 text
    Text,
    Unsupported(String),
}

impl DocumentKind {
    /// Classify an object key by the text after its last `.` (lowercased).
    /// A key without a dot is treated as if the whole key were the extension.
    pub fn from_key(key: &str) -> Self {
        let lower = key.to_lowercase();
        let ext = lower.rsplit('.').next().unwrap_or_default();
        match ext {
            "pdf" => DocumentKind::Pdf,
            "doc" | "docx" => DocumentKind::Word,
            "txt" => DocumentKind::Text,
            other => DocumentKind::Unsupported(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(DocumentKind::from_key("school-docs/Calendar.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_key("school-docs/policy.docx"), DocumentKind::Word);
        assert_eq!(DocumentKind::from_key("school-docs/a.b.txt"), DocumentKind::Text);
        assert_eq!(
            DocumentKind::from_key("school-docs/photo.jpg"),
            DocumentKind::Unsupported("jpg".to_string())
        );
    }

    #[test]
    fn test_key_without_extension() {
        assert_eq!(
            DocumentKind::from_key("school-docs/README"),
            DocumentKind::Unsupported("school-docs/readme".to_string())
        );
    }
}
