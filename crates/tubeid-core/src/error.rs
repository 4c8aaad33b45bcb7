//! Error types for Tubeid core operations.

use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Tubeid core operations.
///
/// Extraction has a single failure outcome. The input is carried for
/// reporting only; it says nothing about *why* no ID was found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No video ID could be extracted from the input.
    #[error("No video ID could be extracted from: {input}")]
    ExtractionFailed {
        /// The raw input that was rejected.
        input: String,
    },

    /// A string was not a well-formed 11-character video ID.
    #[error("Invalid video ID: {0}")]
    InvalidVideoId(String),
}

impl Error {
    /// Create an extraction failure for the given input.
    pub fn extraction_failed(input: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            input: input.into(),
        }
    }

    /// Whether this error is the extraction failure outcome.
    #[must_use]
    pub const fn is_extraction_failure(&self) -> bool {
        matches!(self, Self::ExtractionFailed { .. })
    }
}
