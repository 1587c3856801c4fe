// Document processing pipeline

pub mod processing;
