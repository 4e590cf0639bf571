use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use tokio::task::JoinHandle;

use super::{Net, data::HttpResponse, message::Message};
use crate::{
    ArcStr,
    config::{Config, USizeOpt},
    log::Log,
};

const SCOPE: &str = "net";

/// The core of the networking system that handles HTTP requests.
///
/// It wraps a [`reqwest::Client`] configured with the request timeout read
/// from [`Config`]. Requests are handled one at a time in arrival order.
#[derive(Debug)]
pub struct Core {
    log: Log,
    client: Client,
}

impl Core {
    /// Builds the HTTP client. Falls back to a client without a timeout if the
    /// configured one cannot be built.
    pub async fn new(config: Config, log: Log) -> Self {
        let timeout = Duration::from_secs(config.usize(USizeOpt::Timeout).await as u64);
        let client = match Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                log.error(SCOPE, format!("Failed to build the HTTP client: {e}"));
                Client::new()
            }
        };

        Self { log, client }
    }

    /// Transforms the networking core instance into an actor.
    pub fn spawn(self) -> (Net, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);

        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    Message::Get { url, tx } => {
                        let response = self
                            .handle_get_request(url.clone())
                            .await
                            .with_context(|| format!("GET request failed for URL: {url}"));
                        let response = self.log.info_on_error(SCOPE, response);
                        let _ = tx.send(response);
                    }
                }
            }
        });

        (Net::Actual(tx), handle)
    }

    async fn handle_get_request(&self, url: ArcStr) -> anyhow::Result<HttpResponse> {
        let response = self
            .client
            .get(&*url)
            .send()
            .await
            .context("Sending GET request")?;
        let status = response.status().as_u16();
        let body = response.bytes().await.context("Reading response body")?;
        self.log
            .info(SCOPE, format!("GET {url} answered with status {status}"));
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
