use anyhow::Context;
use tokio::sync::{mpsc::Sender, oneshot};

use crate::{ArcPath, ArcStr, fs::Fs, log::LogLevel};

mod core;
mod data;
pub mod message;
pub mod mock;

pub use data::{Data, PathOpt, USizeOpt};
use message::Message;

/// The configuration actor that provides a thread-safe interface for configuration operations.
///
/// This enum represents either a real configuration actor backed by a TOML file
/// or a mock holding its data in memory. Both expose the same interface.
///
/// # Examples
/// ```ignore
/// let config = Config::spawn(fs, config_path);
/// config.load().await?;
/// let cache_dir = config.path(PathOpt::CacheDir).await;
/// ```
///
/// # Thread Safety
/// Cloning is cheap as it only copies the channel sender.
#[derive(Debug, Clone)]
pub enum Config {
    /// A real configuration actor that reads from and writes to a file
    Actual(Sender<Message>),
    /// A mock implementation for testing that stores data in memory
    Mock(mock::Mock),
}

impl Config {
    /// Spawns a configuration actor for the file at `path`. Nothing is read
    /// until [`Config::load`] is called, so the defaults apply until then.
    pub fn spawn(fs: Fs, path: ArcPath) -> Self {
        let (config, _) = core::Core::new(fs, path).spawn();
        config
    }

    pub fn mock(data: Data) -> Self {
        Self::Mock(mock::Mock::new(data))
    }

    /// Loads the configuration from the file.
    ///
    /// # Errors
    /// If the file cannot be opened or is not valid TOML. The values held
    /// before the call stay in place.
    pub async fn load(&self) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::Load { tx })
                    .await
                    .context("Loading config with Config actor")
                    .expect("Config actor died");
                rx.await
                    .context("Awaiting response for config load with Config actor")
                    .expect("Config actor died")
            }
            Self::Mock(mock) => mock.load().await,
        }
    }

    /// Saves the current configuration to the file, creating its parent
    /// directory when missing.
    pub async fn save(&self) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::Save { tx })
                    .await
                    .context("Saving config with Config actor")
                    .expect("Config actor died");
                rx.await
                    .context("Awaiting response for config save with Config actor")
                    .expect("Config actor died")
            }
            Self::Mock(mock) => mock.save().await,
        }
    }

    pub async fn path(&self, opt: PathOpt) -> ArcPath {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::GetPath { opt, tx })
                    .await
                    .context("Getting path with Config actor")
                    .expect("Config actor died");
                rx.await
                    .context("Awaiting response for path with Config actor")
                    .expect("Config actor died")
            }
            Self::Mock(mock) => mock.path(opt).await,
        }
    }

    pub async fn set_path(&self, opt: PathOpt, path: ArcPath) {
        match self {
            Self::Actual(sender) => {
                sender
                    .send(Message::SetPath { opt, path })
                    .await
                    .context("Setting path with Config actor")
                    .expect("Config actor died");
            }
            Self::Mock(mock) => mock.set_path(opt, path).await,
        }
    }

    pub async fn log_level(&self) -> LogLevel {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::GetLogLevel { tx })
                    .await
                    .context("Getting log level with Config actor")
                    .expect("Config actor died");
                rx.await
                    .context("Awaiting response for log level with Config actor")
                    .expect("Config actor died")
            }
            Self::Mock(mock) => mock.log_level().await,
        }
    }

    pub async fn set_log_level(&self, level: LogLevel) {
        match self {
            Self::Actual(sender) => {
                sender
                    .send(Message::SetLogLevel { level })
                    .await
                    .context("Setting log level with Config actor")
                    .expect("Config actor died");
            }
            Self::Mock(mock) => mock.set_log_level(level).await,
        }
    }

    pub async fn usize(&self, opt: USizeOpt) -> usize {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::GetUSize { opt, tx })
                    .await
                    .context("Getting numeric value with Config actor")
                    .expect("Config actor died");
                rx.await
                    .context("Awaiting response for numeric value with Config actor")
                    .expect("Config actor died")
            }
            Self::Mock(mock) => mock.usize(opt).await,
        }
    }

    pub async fn set_usize(&self, opt: USizeOpt, value: usize) {
        match self {
            Self::Actual(sender) => {
                sender
                    .send(Message::SetUSize { opt, size: value })
                    .await
                    .context("Setting numeric value with Config actor")
                    .expect("Config actor died");
            }
            Self::Mock(mock) => mock.set_usize(opt, value).await,
        }
    }

    /// The remote feed endpoint, if one was configured.
    pub async fn feed_url(&self) -> Option<ArcStr> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::GetFeedUrl { tx })
                    .await
                    .context("Getting feed url with Config actor")
                    .expect("Config actor died");
                rx.await
                    .context("Awaiting response for feed url with Config actor")
                    .expect("Config actor died")
            }
            Self::Mock(mock) => mock.feed_url().await,
        }
    }

    pub async fn set_feed_url(&self, url: Option<ArcStr>) {
        match self {
            Self::Actual(sender) => {
                sender
                    .send(Message::SetFeedUrl { url })
                    .await
                    .context("Setting feed url with Config actor")
                    .expect("Config actor died");
            }
            Self::Mock(mock) => mock.set_feed_url(url).await,
        }
    }
}
