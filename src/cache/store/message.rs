use chrono::{DateTime, Utc};
use tokio::sync::oneshot::Sender;

use super::data::{CachedFeed, LocalFeedImage};
use crate::cache::StoreError;

/// Messages that can be sent to a file-backed store [`Core`](super::core::Core).
#[derive(Debug)]
pub enum Message {
    /// Removes the cached snapshot, if any
    Delete {
        tx: Sender<Result<(), StoreError>>,
    },
    /// Replaces the cached snapshot
    Insert {
        feed: Vec<LocalFeedImage>,
        timestamp: DateTime<Utc>,
        tx: Sender<Result<(), StoreError>>,
    },
    /// Reads the cached snapshot
    Retrieve {
        tx: Sender<Result<Option<CachedFeed>, StoreError>>,
    },
}
