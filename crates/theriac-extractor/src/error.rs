//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Literature repository error
    #[error("Repository error: {0}")]
    Repository(String),

    /// Repository call exceeded the configured timeout
    #[error("Repository call timed out")]
    Timeout,

    /// Background task failed to complete
    #[error("Task error: {0}")]
    Task(String),

    /// Invalid extraction options
    #[error("Invalid options: {0}")]
    Options(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
