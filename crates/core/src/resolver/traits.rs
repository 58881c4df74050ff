//! Trait definitions for the resolver module.

use async_trait::async_trait;
use std::path::Path;

use super::error::ResolverError;
use super::types::ResolvedInput;

/// Resolves an arbitrary input reference into a readable local file.
#[async_trait]
pub trait InputResolver: Send + Sync {
    /// Returns the name of this resolver implementation.
    fn name(&self) -> &str;

    /// Normalizes `reference` into a guaranteed-readable local path, staging
    /// a temporary copy when the source is not already randomly-accessible.
    async fn resolve(&self, reference: &str) -> Result<ResolvedInput, ResolverError>;
}

/// Capability to copy the bytes behind an opaque handle to a local path.
///
/// Platform content handles (`content://`) expose no stable filesystem path;
/// whatever mediates them (a document picker, a storage framework) implements
/// this trait. A filesystem-backed provider covers `file://` URIs and plain
/// paths.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Copies the referenced bytes to `dest`, returning the byte count.
    async fn copy_to(&self, reference: &str, dest: &Path) -> Result<u64, std::io::Error>;
}
