//! Counters for the document pipeline.
//!
//! Recorded through the `metrics` facade; without an installed recorder they are no-ops.

use std::fmt;

/// All metric names used by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    DocumentsCleaned,
    DocumentsSkipped,
    DocumentsFailed,
    CleanedBytes,
    IngestionJobsTriggered,
    IngestionJobsFailed,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::DocumentsCleaned => "school_docs_documents_cleaned_total",
            MetricName::DocumentsSkipped => "school_docs_documents_skipped_total",
            MetricName::DocumentsFailed => "school_docs_documents_failed_total",
            MetricName::CleanedBytes => "school_docs_cleaned_bytes",
            MetricName::IngestionJobsTriggered => "school_docs_ingestion_jobs_triggered_total",
            MetricName::IngestionJobsFailed => "school_docs_ingestion_jobs_failed_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub mod documents {
    use super::MetricName;

    /// Record a document cleaned with the given strategy
    pub fn cleaned(strategy: &str, bytes: usize) {
        ::metrics::counter!(MetricName::DocumentsCleaned.as_str(), "strategy" => strategy.to_string())
            .increment(1);
        ::metrics::histogram!(MetricName::CleanedBytes.as_str()).record(bytes as f64);
    }

    /// Record a document skipped before cleaning
    pub fn skipped(reason: &'static str) {
        ::metrics::counter!(MetricName::DocumentsSkipped.as_str(), "reason" => reason).increment(1);
    }

    pub fn failed() {
        ::metrics::counter!(MetricName::DocumentsFailed.as_str()).increment(1);
    }
}

pub mod ingestion {
    use super::MetricName;

    pub fn triggered() {
        ::metrics::counter!(MetricName::IngestionJobsTriggered.as_str()).increment(1);
    }

    pub fn failed() {
        ::metrics::counter!(MetricName::IngestionJobsFailed.as_str()).increment(1);
    }
}
