use anyhow::Context;
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc::Sender, oneshot};

use super::StoreError;
use crate::{config::Config, fs::Fs, log::Log};

pub mod core;
mod data;
pub mod message;
pub mod mock;
#[cfg(test)]
mod tests;

pub use data::{CachedFeed, LocalFeedImage};
use message::Message;
pub use mock::ReceivedMessage;

/// The feed store actor. It holds at most one [`CachedFeed`] snapshot.
///
/// Every operation answers exactly once. The actual store persists the
/// snapshot on disk, the mock is a spy whose answers are driven by tests.
///
/// # Examples
/// ```ignore
/// let store = FeedStore::spawn(fs, config, log).await;
/// store.insert(feed, Utc::now()).await?;
/// let cache = store.retrieve().await?;
/// ```
#[derive(Debug, Clone)]
pub enum FeedStore {
    /// A file-backed store
    Actual(Sender<Message>),
    /// A spy recording requests and answering on demand
    Mock(mock::Mock),
}

impl FeedStore {
    /// Spawns a file-backed store in the cache directory found in `config`.
    pub async fn spawn(fs: Fs, config: Config, log: Log) -> Self {
        let (store, _) = core::Core::new(fs, config, log).await.spawn();
        store
    }

    pub fn mock() -> Self {
        Self::Mock(mock::Mock::new())
    }

    /// Removes the cached snapshot. Succeeds when there is nothing to remove.
    pub async fn delete(&self) -> Result<(), StoreError> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::Delete { tx })
                    .await
                    .context("Deleting cache with FeedStore actor")
                    .expect("FeedStore actor died");
                rx.await
                    .context("Awaiting response for cache deletion with FeedStore actor")
                    .expect("FeedStore actor died")
            }
            Self::Mock(mock) => mock.delete().await,
        }
    }

    /// Replaces the cached snapshot with `feed` taken at `timestamp`.
    pub async fn insert(
        &self,
        feed: Vec<LocalFeedImage>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::Insert {
                        feed,
                        timestamp,
                        tx,
                    })
                    .await
                    .context("Inserting cache with FeedStore actor")
                    .expect("FeedStore actor died");
                rx.await
                    .context("Awaiting response for cache insertion with FeedStore actor")
                    .expect("FeedStore actor died")
            }
            Self::Mock(mock) => mock.insert(feed, timestamp).await,
        }
    }

    /// Reads the cached snapshot, `None` when the cache is empty.
    pub async fn retrieve(&self) -> Result<Option<CachedFeed>, StoreError> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::Retrieve { tx })
                    .await
                    .context("Retrieving cache with FeedStore actor")
                    .expect("FeedStore actor died");
                rx.await
                    .context("Awaiting response for cache retrieval with FeedStore actor")
                    .expect("FeedStore actor died")
            }
            Self::Mock(mock) => mock.retrieve().await,
        }
    }
}
