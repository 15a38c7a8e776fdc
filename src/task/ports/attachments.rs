//! File retrieval port for task attachments.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for attachment retrieval.
pub type AttachmentFetchResult<T> = Result<T, AttachmentFetchError>;

/// Downloads attachment bytes by URL.
#[async_trait]
pub trait AttachmentFetcher: Send + Sync {
    /// Fetches the raw bytes behind `url`.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentFetchError`] when the download fails.
    async fn fetch(&self, url: &str) -> AttachmentFetchResult<Vec<u8>>;
}

/// Errors returned by attachment fetchers.
#[derive(Debug, Clone, Error)]
pub enum AttachmentFetchError {
    /// The server answered with a non-success HTTP status.
    #[error("download of {url} failed with HTTP status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The request could not be sent or the body could not be read.
    #[error("download network error: {0}")]
    Network(Arc<dyn std::error::Error + Send + Sync>),
}

impl AttachmentFetchError {
    /// Wraps a network-level error.
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(err))
    }
}
