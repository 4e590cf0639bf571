use tokio::sync::oneshot::Sender;

use super::error::RemoteFeedError;
use crate::feed::FeedImage;

/// Messages that can be sent to a [`Core`](super::core::Core) actor.
#[derive(Debug)]
pub enum Message {
    /// Fetches the feed from the configured endpoint
    Load {
        tx: Sender<Result<Vec<FeedImage>, RemoteFeedError>>,
    },
}
