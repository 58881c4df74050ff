//! Resolver module for normalizing input references.
//!
//! A caller's input may arrive as an opaque handle with no random access and
//! no guaranteed lifetime. The transcoding engine needs a stable local path
//! for the whole invocation, so the resolver stages a temporary copy whenever
//! the reference is not already a readable local file.

mod error;
mod fs_resolver;
mod traits;
mod types;

pub use error::ResolverError;
pub use fs_resolver::{FsContentProvider, FsResolver};
pub use traits::{ContentProvider, InputResolver};
pub use types::{ReferenceKind, ResolvedInput};
