use std::sync::Arc;

use crate::{
    api::feed::{RemoteFeedError, RemoteFeedLoader},
    cache::{LocalFeedError, LocalFeedLoader, complete},
};

#[cfg(test)]
mod tests;

/// Failures of [`refresh`], by the stage that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefreshError {
    #[error("failed to fetch the feed: {0}")]
    Remote(#[from] RemoteFeedError),
    #[error("failed to cache the feed: {0}")]
    Cache(#[from] LocalFeedError),
    /// The save ended without reporting a result.
    #[error("the cache was dropped before the feed was saved")]
    Interrupted,
}

/// Fetches the remote feed and replaces the cached one with it. Returns the
/// number of images cached.
///
/// The store is only touched once the remote load succeeded, so a failed
/// fetch leaves the previous snapshot in place.
pub async fn refresh(
    remote: &RemoteFeedLoader,
    loader: &Arc<LocalFeedLoader>,
) -> Result<usize, RefreshError> {
    let feed = remote.load().await?;
    let count = feed.len();

    complete(|done| loader.save(feed, done))
        .await
        .ok_or(RefreshError::Interrupted)??;

    Ok(count)
}
