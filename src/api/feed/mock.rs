use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use super::error::RemoteFeedError;
use crate::feed::FeedImage;

/// Mock implementation of the remote feed loader that answers every load with
/// the same preset result.
#[derive(Debug, Clone)]
pub struct Mock {
    result: Result<Vec<FeedImage>, RemoteFeedError>,
    loads: Arc<AtomicUsize>,
}

impl Mock {
    pub fn new(result: Result<Vec<FeedImage>, RemoteFeedError>) -> Self {
        Self {
            result,
            loads: Default::default(),
        }
    }

    pub async fn load(&self) -> Result<Vec<FeedImage>, RemoteFeedError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}
