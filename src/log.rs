use std::fmt::Display;

use tokio::{
    sync::{
        mpsc::{Sender, error::TrySendError},
        oneshot,
    },
    task::JoinHandle,
};

use crate::{ArcPath, fs::Fs};

pub mod core;
mod data;
pub mod message;
pub mod mock;
#[cfg(test)]
mod tests;

pub use data::{LogLevel, LogMessage};
use message::Message;

/// The logging actor that provides a thread-safe interface for logging operations.
///
/// Every message carries a scope, a short dotted name of the component that
/// emitted it (e.g. `cache.local`).
///
/// # Examples
/// ```ignore
/// let log = Log::spawn(fs, LogLevel::Warning, 7, log_dir).await?;
/// log.info("app", "Application started");
/// ```
///
/// # Thread Safety
/// Cloning is cheap as it only copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Log {
    /// A real logging actor that writes to files and stderr
    Actual(Sender<Message>),
    /// A mock implementation that keeps messages in memory
    Mock(mock::Mock),
}

impl Log {
    /// Builds a logger writing to `log_dir` and spawns its actor.
    ///
    /// # Errors
    /// If the log directory or one of the log files cannot be created.
    pub async fn spawn(
        fs: Fs,
        level: LogLevel,
        max_age: usize,
        log_dir: ArcPath,
    ) -> anyhow::Result<Self> {
        let (log, _) = core::LogCore::build(fs, level, max_age, log_dir)
            .await?
            .spawn();
        Ok(log)
    }

    /// Creates a new mock logger for testing.
    pub fn mock() -> Self {
        Self::Mock(mock::Mock::new())
    }

    /// Queues a [`LogMessage`] without blocking the caller. Messages from one
    /// caller reach the log files in the order they were logged.
    ///
    /// Messages logged after a flush go straight to stderr.
    fn log(&self, scope: &'static str, message: String, level: LogLevel) {
        match self {
            Self::Actual(sender) => {
                match sender.try_send(Message::Log(LogMessage::new(level, scope, message))) {
                    Ok(()) => {}
                    Err(TrySendError::Full(msg)) => {
                        let sender = sender.clone();
                        tokio::spawn(async move {
                            if let Err(e) = sender.send(msg).await {
                                if let Message::Log(msg) = e.0 {
                                    eprintln!("{msg}");
                                }
                            }
                        });
                    }
                    Err(TrySendError::Closed(Message::Log(msg))) => eprintln!("{msg}"),
                    Err(TrySendError::Closed(_)) => {}
                }
            }
            Self::Mock(mock) => mock.log(scope, message, level),
        }
    }

    /// Log a message with the `INFO` level
    pub fn info<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Info);
    }

    /// Log a message with the `WARNING` level
    pub fn warn<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Warning);
    }

    /// Log a message with the `ERROR` level
    pub fn error<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Error);
    }

    /// Log an info message if the result is an error and return the result as is
    pub fn info_on_error<T, E: Display>(
        &self,
        scope: &'static str,
        result: Result<T, E>,
    ) -> Result<T, E> {
        self.on_error(scope, result, LogLevel::Info)
    }

    /// Log a warning message if the result is an error and return the result as is
    pub fn warn_on_error<T, E: Display>(
        &self,
        scope: &'static str,
        result: Result<T, E>,
    ) -> Result<T, E> {
        self.on_error(scope, result, LogLevel::Warning)
    }

    /// Log an error message if the result is an error and return the result as is
    pub fn error_on_error<T, E: Display>(
        &self,
        scope: &'static str,
        result: Result<T, E>,
    ) -> Result<T, E> {
        self.on_error(scope, result, LogLevel::Error)
    }

    fn on_error<T, E: Display>(
        &self,
        scope: &'static str,
        result: Result<T, E>,
        level: LogLevel,
    ) -> Result<T, E> {
        if let Err(err) = &result {
            self.log(scope, err.to_string(), level);
        }
        result
    }

    /// Flushes the logger by printing its buffered messages to stderr and
    /// closing the log files. The returned handle resolves once the actor has
    /// written everything it received before the flush.
    ///
    /// # Panics
    /// If called twice
    pub fn flush(self) -> JoinHandle<()> {
        match self {
            Self::Actual(sender) => tokio::spawn(async move {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::Flush { tx })
                    .await
                    .expect("Flushing a logger twice");
                let _ = rx.await;
            }),
            Self::Mock(mock) => mock.flush(),
        }
    }

    /// Deletes log files older than the `max_age` given to [`Log::spawn`].
    ///
    /// # Panics
    /// If called after a flush
    pub async fn collect_garbage(&self) {
        let Self::Actual(sender) = self else {
            return;
        };

        sender
            .send(Message::CollectGarbage)
            .await
            .expect("Attempt to use logger after a flush")
    }

    /// Returns the recorded messages of a mock logger, `None` for an actual one.
    pub async fn get_messages(&self) -> Option<Vec<LogMessage>> {
        match self {
            Self::Actual(_) => None,
            Self::Mock(mock) => Some(mock.get_messages().await),
        }
    }
}
