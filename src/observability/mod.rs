// Observability: metrics for the document pipeline

pub mod metrics;
