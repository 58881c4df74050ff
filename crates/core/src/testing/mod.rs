//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external capability
//! traits (transcoding engine, content provider), allowing full pipeline
//! tests without ffmpeg or a platform storage framework.
//!
//! # Example
//!
//! ```rust,ignore
//! use waveshift_core::testing::{MockContentProvider, MockEngine};
//!
//! let engine = MockEngine::new();
//! let provider = MockContentProvider::new();
//!
//! // Configure mock behavior
//! provider.set_content("content://media/audio/42", b"ID3".to_vec()).await;
//! engine.set_failure(vec!["Invalid data found".to_string()]).await;
//!
//! // Use in an orchestrator...
//! ```

mod mock_content_provider;
mod mock_engine;

pub use mock_content_provider::MockContentProvider;
pub use mock_engine::MockEngine;
