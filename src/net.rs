use std::collections::HashMap;

use anyhow::Context;
use tokio::sync::mpsc::Sender;

use crate::{ArcStr, config::Config, log::Log};

mod core;
mod data;
pub mod message;
pub mod mock;

pub use data::HttpResponse;
use message::Message;

/// The networking actor that provides a thread-safe interface for HTTP requests.
///
/// # Examples
/// ```ignore
/// let net = Net::spawn(config, log).await;
/// let response = net.get(url).await?;
/// ```
///
/// # Thread Safety
/// Cloning is cheap as it only copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Net {
    /// A real networking actor that performs HTTP requests
    Actual(Sender<Message>),
    /// A mock serving canned responses
    Mock(mock::Mock),
}

impl Net {
    /// Spawns a networking actor whose client uses the timeout from `config`.
    pub async fn spawn(config: Config, log: Log) -> Self {
        let (net, _) = core::Core::new(config, log).await.spawn();
        net
    }

    /// Creates a mock answering each URL in `responses` with its canned response.
    pub fn mock(responses: HashMap<ArcStr, HttpResponse>) -> Self {
        Self::Mock(mock::Mock::new(responses))
    }

    /// Performs an HTTP GET request to the specified URL.
    ///
    /// # Errors
    /// Only when no response was received at all (DNS, connection, timeout,
    /// truncated body). A non-2xx status is returned as a regular response.
    pub async fn get(&self, url: ArcStr) -> anyhow::Result<HttpResponse> {
        match self {
            Net::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Get { url, tx })
                    .await
                    .context("Sending message to Net actor")
                    .expect("Net actor died");
                rx.await
                    .context("Awaiting response from Net actor")
                    .expect("Net actor died")
            }
            Net::Mock(mock) => mock.get(url).await,
        }
    }

    /// URLs requested so far from a mock, `None` for an actual actor.
    pub async fn requests(&self) -> Option<Vec<ArcStr>> {
        match self {
            Net::Actual(_) => None,
            Net::Mock(mock) => Some(mock.requests().await),
        }
    }
}
