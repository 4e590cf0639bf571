use anyhow::Context;
use tokio::sync::{mpsc::Sender, oneshot};
use url::Url;

use crate::{feed::FeedImage, log::Log, net::Net};

mod core;
mod data;
mod error;
pub mod message;
pub mod mock;
pub mod parse;
#[cfg(test)]
mod tests;

pub use data::{RemoteFeedItem, RemoteFeedPage};
pub use error::RemoteFeedError;
use message::Message;

/// The remote feed loader actor. It fetches the feed from a single endpoint
/// through the networking actor.
///
/// # Examples
/// ```ignore
/// let remote = RemoteFeedLoader::spawn(net, url, log);
/// let feed = remote.load().await?;
/// ```
#[derive(Debug, Clone)]
pub enum RemoteFeedLoader {
    /// A real loader that performs HTTP requests through the networking actor
    Actual(Sender<Message>),
    /// A mock answering every load with a preset result
    Mock(mock::Mock),
}

impl RemoteFeedLoader {
    /// Spawns a loader for `url`. Nothing is requested until [`Self::load`].
    pub fn spawn(net: Net, url: Url, log: Log) -> Self {
        let (loader, _) = core::Core::new(net, url, log).spawn();
        loader
    }

    pub fn mock(result: Result<Vec<FeedImage>, RemoteFeedError>) -> Self {
        Self::Mock(mock::Mock::new(result))
    }

    /// Fetches the feed.
    ///
    /// # Errors
    /// [`RemoteFeedError::Connectivity`] when the server could not be reached
    /// and [`RemoteFeedError::InvalidData`] for anything but a 200 with a
    /// valid body.
    pub async fn load(&self) -> Result<Vec<FeedImage>, RemoteFeedError> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::Load { tx })
                    .await
                    .context("Sending message to RemoteFeedLoader actor")
                    .expect("RemoteFeedLoader actor died");
                rx.await
                    .context("Awaiting response from RemoteFeedLoader actor")
                    .expect("RemoteFeedLoader actor died")
            }
            Self::Mock(mock) => mock.load().await,
        }
    }
}
