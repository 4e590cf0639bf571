use std::{collections::VecDeque, sync::Arc};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::data::{LogLevel, LogMessage};

/// Mock implementation of the Log actor for testing purposes.
///
/// Messages are kept in memory so tests can assert on what was logged
/// without touching the filesystem.
#[derive(Debug, Clone, Default)]
pub struct Mock {
    messages: Arc<Mutex<VecDeque<LogMessage>>>,
}

impl Mock {
    pub fn new() -> Self {
        Default::default()
    }

    /// Records a message. The write happens on a separate task so the caller
    /// never waits on the lock.
    pub fn log(&self, scope: &'static str, message: String, level: LogLevel) {
        let messages = self.messages.clone();
        tokio::spawn(async move {
            let mut lock = messages.lock().await;
            lock.push_back(LogMessage::new(level, scope, message));
        });
    }

    /// Prints every recorded message to stderr.
    pub fn flush(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let lock = self.messages.lock().await;
            for message in lock.iter() {
                eprintln!("{message}");
            }
        })
    }

    pub async fn get_messages(&self) -> Vec<LogMessage> {
        let lock = self.messages.lock().await;
        lock.iter().cloned().collect()
    }
}
