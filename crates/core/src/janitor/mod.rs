//! Janitor module for staged temp file lifecycle.
//!
//! The resolver acquires staged files; the janitor releases them. Per-request
//! cleanup runs on every exit path, and a periodic orphan sweep bounds the
//! leak window for anything an interrupted process left behind.

mod temp_janitor;
mod types;

pub use temp_janitor::{TempFileJanitor, DEFAULT_RETENTION};
pub use types::{StagedFileRecord, SweepReport};
