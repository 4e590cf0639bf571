use tokio::task::JoinHandle;
use url::Url;

use super::{RemoteFeedLoader, error::RemoteFeedError, message::Message, parse};
use crate::{ArcStr, feed::FeedImage, log::Log, net::Net};

const SCOPE: &str = "api.feed";

/// The core of the remote feed loader. It turns feed requests into GET
/// requests on the networking actor and maps the replies.
#[derive(Debug)]
pub struct Core {
    /// The networking actor for making HTTP requests
    net: Net,
    /// The feed endpoint
    url: Url,
    log: Log,
}

impl Core {
    pub fn new(net: Net, url: Url, log: Log) -> Self {
        Self { net, url, log }
    }

    /// Transforms the core into an actor. No request is made until the first
    /// [`Message::Load`] arrives.
    pub fn spawn(self) -> (RemoteFeedLoader, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);

        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    Message::Load { tx } => {
                        let _ = tx.send(self.load().await);
                    }
                }
            }
        });

        (RemoteFeedLoader::Actual(tx), handle)
    }

    async fn load(&self) -> Result<Vec<FeedImage>, RemoteFeedError> {
        let response = match self.net.get(ArcStr::from(self.url.as_str())).await {
            Ok(response) => response,
            Err(e) => {
                self.log.warn(SCOPE, format!("{e:#}"));
                return Err(RemoteFeedError::Connectivity);
            }
        };

        let feed = parse::map(&response);
        match &feed {
            Ok(feed) => self.log.info(
                SCOPE,
                format!("Fetched {} images from {}", feed.len(), self.url),
            ),
            Err(e) => self.log.warn(
                SCOPE,
                format!("{e} (status {}, {} bytes)", response.status, response.body.len()),
            ),
        }
        feed
    }
}
