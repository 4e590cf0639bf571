use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard, Notify, oneshot};

use super::data::{CachedFeed, LocalFeedImage};
use crate::cache::StoreError;

/// A request observed by the store spy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceivedMessage {
    DeleteCachedFeed,
    Insert(Vec<LocalFeedImage>, DateTime<Utc>),
    Retrieve,
}

type Completion<T> = Option<oneshot::Sender<Result<T, StoreError>>>;

#[derive(Debug, Default)]
struct State {
    received: Vec<ReceivedMessage>,
    deletions: Vec<Completion<()>>,
    insertions: Vec<Completion<()>>,
    retrievals: Vec<Completion<Option<CachedFeed>>>,
}

impl State {
    fn deletions(&mut self) -> &mut Vec<Completion<()>> {
        &mut self.deletions
    }

    fn insertions(&mut self) -> &mut Vec<Completion<()>> {
        &mut self.insertions
    }

    fn retrievals(&mut self) -> &mut Vec<Completion<Option<CachedFeed>>> {
        &mut self.retrievals
    }
}

/// Store spy for testing the feed loaders.
///
/// It records every request in call order and never answers on its own: each
/// request stays pending until the test completes it by index. This makes it
/// possible to observe what happens between two store steps.
#[derive(Debug, Clone, Default)]
pub struct Mock {
    state: Arc<Mutex<State>>,
    changed: Arc<Notify>,
}

impl Mock {
    pub fn new() -> Self {
        Default::default()
    }

    pub async fn delete(&self) -> Result<(), StoreError> {
        let (tx, rx) = oneshot::channel();
        self.record(ReceivedMessage::DeleteCachedFeed, |state| {
            state.deletions.push(Some(tx))
        })
        .await;
        Self::reply(rx).await
    }

    pub async fn insert(
        &self,
        feed: Vec<LocalFeedImage>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let (tx, rx) = oneshot::channel();
        self.record(ReceivedMessage::Insert(feed, timestamp), |state| {
            state.insertions.push(Some(tx))
        })
        .await;
        Self::reply(rx).await
    }

    pub async fn retrieve(&self) -> Result<Option<CachedFeed>, StoreError> {
        let (tx, rx) = oneshot::channel();
        self.record(ReceivedMessage::Retrieve, |state| {
            state.retrievals.push(Some(tx))
        })
        .await;
        Self::reply(rx).await
    }

    /// Every request received so far, in call order.
    pub async fn received_messages(&self) -> Vec<ReceivedMessage> {
        self.state.lock().await.received.clone()
    }

    /// Waits until at least `count` requests were received.
    pub async fn wait_for_messages(&self, count: usize) {
        drop(self.wait_until(|state| state.received.len() >= count).await);
    }

    pub async fn complete_deletion(&self, index: usize) {
        self.complete(index, State::deletions, Ok(())).await;
    }

    pub async fn complete_deletion_with_error(&self, index: usize, error: StoreError) {
        self.complete(index, State::deletions, Err(error)).await;
    }

    pub async fn complete_insertion(&self, index: usize) {
        self.complete(index, State::insertions, Ok(())).await;
    }

    pub async fn complete_insertion_with_error(&self, index: usize, error: StoreError) {
        self.complete(index, State::insertions, Err(error)).await;
    }

    pub async fn complete_retrieval(&self, index: usize, cache: CachedFeed) {
        self.complete(index, State::retrievals, Ok(Some(cache))).await;
    }

    pub async fn complete_retrieval_with_empty_cache(&self, index: usize) {
        self.complete(index, State::retrievals, Ok(None)).await;
    }

    pub async fn complete_retrieval_with_error(&self, index: usize, error: StoreError) {
        self.complete(index, State::retrievals, Err(error)).await;
    }

    async fn record(&self, message: ReceivedMessage, pending: impl FnOnce(&mut State)) {
        {
            let mut state = self.state.lock().await;
            state.received.push(message);
            pending(&mut *state);
        }
        self.changed.notify_waiters();
    }

    async fn reply<T>(rx: oneshot::Receiver<Result<T, StoreError>>) -> Result<T, StoreError> {
        rx.await
            .unwrap_or_else(|_| Err(StoreError::new("store spy dropped the request")))
    }

    /// Answers the request at `index` once it has been received.
    ///
    /// # Panics
    /// If that request was already answered.
    async fn complete<T>(
        &self,
        index: usize,
        pending: fn(&mut State) -> &mut Vec<Completion<T>>,
        result: Result<T, StoreError>,
    ) {
        let mut state = self.wait_until(|state| pending(state).len() > index).await;
        let tx = pending(&mut *state)[index]
            .take()
            .expect("store request completed twice");
        drop(state);
        let _ = tx.send(result);
    }

    async fn wait_until(
        &self,
        mut predicate: impl FnMut(&mut State) -> bool,
    ) -> MutexGuard<'_, State> {
        loop {
            // registered before checking so a concurrent notification is not lost
            let notified = self.changed.notified();
            let mut state = self.state.lock().await;
            if predicate(&mut *state) {
                return state;
            }
            drop(state);
            notified.await;
        }
    }
}
