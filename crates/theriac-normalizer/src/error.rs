//! Normalizer error types

use thiserror::Error;

/// Errors that can occur during normalization
#[derive(Error, Debug)]
pub enum NormalizerError {
    /// Merge called with an empty record group (caller bug, never a
    /// data-quality condition)
    #[error("Cannot merge an empty record group")]
    EmptyGroup,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
