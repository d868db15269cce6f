//! Error types for the pipeline engines

use thiserror::Error;

/// Errors that can occur while running the engines
///
/// Data-quality problems never surface here; they land in the rejected
/// buckets of the run outcome instead. These variants cover contract
/// violations, extraction-level failures, and export plumbing.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Merge contract violation surfaced by the normalizer
    #[error("Normalization error: {0}")]
    Normalizer(#[from] theriac_normalizer::NormalizerError),

    /// Extraction run could not start or finish
    #[error("Extraction error: {0}")]
    Extractor(#[from] theriac_extractor::ExtractorError),

    /// Serializing an outcome for export failed
    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),

    /// Writing an export file failed
    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
