use crate::ArcStr;

/// An opaque failure reported by a [`FeedStore`](super::FeedStore).
///
/// It only carries the rendered error chain, which keeps it cheap to clone
/// and compare.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(ArcStr);

impl StoreError {
    pub fn new(message: impl Into<ArcStr>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        Self(ArcStr::from(format!("{err:#}")))
    }
}

/// Failures of the [`LocalFeedLoader`](super::LocalFeedLoader). Each variant
/// names the store step that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocalFeedError {
    #[error("failed to delete the cached feed: {0}")]
    Deletion(StoreError),
    #[error("failed to insert the feed into the cache: {0}")]
    Insertion(StoreError),
    #[error("failed to retrieve the cached feed: {0}")]
    Retrieval(StoreError),
}
