//! Error types for the resolver module.

use thiserror::Error;

/// Errors that can occur while resolving an input reference.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The reference does not resolve to readable bytes.
    #[error("input not found or inaccessible: {reference}")]
    InputNotFound { reference: String },

    /// Copying the referenced bytes to the staging area failed, or the
    /// staged copy did not exist afterwards.
    #[error("failed to stage input {reference}: {source}")]
    StagingFailed {
        reference: String,
        #[source]
        source: std::io::Error,
    },
}

impl ResolverError {
    /// Creates an `InputNotFound` error.
    pub fn input_not_found(reference: impl Into<String>) -> Self {
        Self::InputNotFound {
            reference: reference.into(),
        }
    }

    /// Creates a `StagingFailed` error with the underlying cause attached.
    pub fn staging_failed(reference: impl Into<String>, source: std::io::Error) -> Self {
        Self::StagingFailed {
            reference: reference.into(),
            source,
        }
    }
}
