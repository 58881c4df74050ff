//! Mock content provider for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::resolver::ContentProvider;

/// Mock implementation of the `ContentProvider` trait.
///
/// Serves configured byte payloads for opaque references, standing in for a
/// platform document picker or storage framework.
#[derive(Debug, Clone, Default)]
pub struct MockContentProvider {
    contents: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    failing_mid_copy: Arc<RwLock<HashSet<String>>>,
}

impl MockContentProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the bytes behind a reference.
    pub async fn set_content(&self, reference: impl Into<String>, bytes: Vec<u8>) {
        self.contents.write().await.insert(reference.into(), bytes);
    }

    /// Makes copies of this reference fail with a permission error.
    pub async fn fail_for(&self, reference: impl Into<String>) {
        self.failing.write().await.insert(reference.into());
    }

    /// Makes copies of this reference write the registered bytes and then
    /// fail, like a stream interrupted partway through.
    pub async fn fail_mid_copy(&self, reference: impl Into<String>) {
        self.failing_mid_copy.write().await.insert(reference.into());
    }
}

#[async_trait]
impl ContentProvider for MockContentProvider {
    async fn copy_to(&self, reference: &str, dest: &Path) -> Result<u64, std::io::Error> {
        if self.failing.read().await.contains(reference) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("cannot open {reference}"),
            ));
        }

        let contents = self.contents.read().await;
        let bytes = contents.get(reference).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no content behind {reference}"),
            )
        })?;

        tokio::fs::write(dest, bytes).await?;

        if self.failing_mid_copy.read().await.contains(reference) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionAborted,
                format!("stream interrupted while copying {reference}"),
            ));
        }

        Ok(bytes.len() as u64)
    }
}
