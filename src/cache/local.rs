use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::{sync::oneshot, task::JoinHandle};

use super::{
    FeedCachePolicy, LocalFeedError,
    store::{FeedStore, LocalFeedImage},
};
use crate::{feed::FeedImage, log::Log};


const SCOPE: &str = "cache.local";

/// Source of the current instant. Injected so tests can pin time.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub type SaveResult = Result<(), LocalFeedError>;
pub type LoadResult = Result<Vec<FeedImage>, LocalFeedError>;
pub type ValidationResult = Result<(), LocalFeedError>;

/// Saves and loads the feed through a [`FeedStore`], applying the
/// [`FeedCachePolicy`] on reads.
///
/// Each operation runs on its own task and reports through a completion
/// called at most once. The tasks only keep a weak reference to the loader:
/// once the last [`Arc`] is dropped, pending operations stop after their
/// current store request and their completions are never called.
///
/// # Examples
/// ```ignore
/// let loader = LocalFeedLoader::new(store, Arc::new(Utc::now), log);
/// loader.save(feed, |result| println!("{result:?}")).await?;
/// ```
pub struct LocalFeedLoader {
    store: FeedStore,
    clock: Clock,
    log: Log,
}

impl LocalFeedLoader {
    /// Performs no store request.
    pub fn new(store: FeedStore, clock: Clock, log: Log) -> Arc<Self> {
        Arc::new(Self { store, clock, log })
    }

    /// Replaces the cached feed with `feed`, stamped with the current time.
    ///
    /// The old snapshot is deleted first; the insert is only issued once the
    /// deletion succeeded.
    pub fn save<F>(self: &Arc<Self>, feed: Vec<FeedImage>, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(SaveResult) + Send + 'static,
    {
        let loader = Arc::downgrade(self);
        let store = self.store.clone();

        tokio::spawn(async move {
            let deleted = store.delete().await;
            let Some(this) = loader.upgrade() else {
                return;
            };
            if let Err(e) = deleted {
                this.log.warn(SCOPE, &e);
                completion(Err(LocalFeedError::Deletion(e)));
                return;
            }

            let timestamp = (this.clock)();
            drop(this);

            let feed = feed.into_iter().map(LocalFeedImage::from).collect();
            let inserted = store.insert(feed, timestamp).await;
            let Some(this) = loader.upgrade() else {
                return;
            };
            if let Err(e) = &inserted {
                this.log.warn(SCOPE, e);
            }
            completion(inserted.map_err(LocalFeedError::Insertion));
        })
    }

    /// Loads the cached feed. An empty or expired cache yields an empty feed.
    ///
    /// This never modifies the store, see [`Self::validate_cache`] for purging.
    pub fn load<F>(self: &Arc<Self>, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(LoadResult) + Send + 'static,
    {
        let loader = Arc::downgrade(self);
        let store = self.store.clone();

        tokio::spawn(async move {
            let retrieved = store.retrieve().await;
            let Some(this) = loader.upgrade() else {
                return;
            };

            let result = match retrieved {
                Err(e) => {
                    this.log.warn(SCOPE, &e);
                    Err(LocalFeedError::Retrieval(e))
                }
                Ok(Some(cache)) if FeedCachePolicy::validate(cache.timestamp, (this.clock)()) => {
                    Ok(cache.feed.into_iter().map(FeedImage::from).collect())
                }
                Ok(_) => Ok(vec![]),
            };
            completion(result);
        })
    }

    /// Deletes the cached snapshot when it cannot be read or has expired.
    ///
    /// Completes with the outcome of the deletion, or with `Ok(())` straight
    /// away when the cache is empty or still valid.
    pub fn validate_cache<F>(self: &Arc<Self>, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(ValidationResult) + Send + 'static,
    {
        let loader = Arc::downgrade(self);
        let store = self.store.clone();

        tokio::spawn(async move {
            let retrieved = store.retrieve().await;
            let Some(this) = loader.upgrade() else {
                return;
            };

            match retrieved {
                Err(e) => this.log.warn(SCOPE, format!("Discarding unreadable cache: {e}")),
                Ok(Some(cache)) if !FeedCachePolicy::validate(cache.timestamp, (this.clock)()) => {
                    this.log.info(
                        SCOPE,
                        format!("Discarding cache saved at {}", cache.timestamp),
                    );
                }
                Ok(_) => {
                    completion(Ok(()));
                    return;
                }
            }
            drop(this);

            let deleted = store.delete().await;
            let Some(this) = loader.upgrade() else {
                return;
            };
            if let Err(e) = &deleted {
                this.log.warn(SCOPE, e);
            }
            completion(deleted.map_err(LocalFeedError::Deletion));
        })
    }
}

/// Runs a loader operation and waits for its completion.
///
/// `None` when the operation ended without calling its completion, which
/// only happens once the loader was dropped.
///
/// # Examples
/// ```ignore
/// let feed = complete(|done| loader.load(done)).await;
/// ```
pub async fn complete<T, F>(operation: F) -> Option<T>
where
    T: Send + 'static,
    F: FnOnce(Box<dyn FnOnce(T) + Send>) -> JoinHandle<()>,
{
    let (tx, rx) = oneshot::channel();
    operation(Box::new(move |result| {
        let _ = tx.send(result);
    }));
    rx.await.ok()
}
