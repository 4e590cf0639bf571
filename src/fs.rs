use std::{collections::LinkedList, io};

use anyhow::Context;
use tokio::{fs::File, sync::mpsc::Sender};

use crate::ArcPath;

mod core;
pub mod message;
pub mod mock;
#[cfg(test)]
mod tests;

use message::Message;

/// The fs actor is responsible for handling filesystem operations.
///
/// This enum represents either a real filesystem actor or a mock implementation
/// rooted in a temporary directory. Both variants share the same interface, so
/// callers never need to know which one they hold.
///
/// # Examples
/// ```ignore
/// let fs = Fs::spawn();
/// let file = fs.read_file(path).await?;
/// ```
///
/// # Thread Safety
/// Cloning is cheap as it only copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Fs {
    /// A real filesystem actor that interacts with the system
    Actual(Sender<Message>),
    /// A mock that resolves every path inside a private temporary directory
    Mock(mock::Mock),
}

impl Fs {
    /// Spawns a new filesystem actor.
    pub fn spawn() -> Self {
        let (fs, _) = core::Core::new().spawn();
        fs
    }

    /// Creates a mock filesystem rooted in a fresh temporary directory.
    ///
    /// # Panics
    /// If the temporary directory cannot be created.
    pub fn mock() -> Self {
        Self::Mock(mock::Mock::new())
    }

    /// Opens a file for reading. Fails with [`io::ErrorKind::NotFound`] if it
    /// does not exist.
    pub async fn read_file(&self, path: ArcPath) -> Result<File, io::Error> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::ReadFile { tx, path })
                    .await
                    .context("Reading file with Fs")
                    .expect("fs actor died");
                rx.await
                    .context("Awaiting response for file read with Fs")
                    .expect("fs actor died")
            }
            Self::Mock(mock) => mock.read_file(path).await,
        }
    }

    /// Opens a file for writing, truncating it and creating it if needed.
    pub async fn write_file(&self, path: ArcPath) -> Result<File, io::Error> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::WriteFile { tx, path })
                    .await
                    .context("Writing file with Fs")
                    .expect("fs actor died");
                rx.await
                    .context("Awaiting response for file write with Fs")
                    .expect("fs actor died")
            }
            Self::Mock(mock) => mock.write_file(path).await,
        }
    }

    /// Opens a file for appending, creating it if needed.
    pub async fn append_file(&self, path: ArcPath) -> Result<File, io::Error> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::AppendFile { tx, path })
                    .await
                    .context("Appending file with Fs")
                    .expect("fs actor died");
                rx.await
                    .context("Awaiting response for file append with Fs")
                    .expect("fs actor died")
            }
            Self::Mock(mock) => mock.append_file(path).await,
        }
    }

    /// Removes a file from the filesystem.
    pub async fn remove_file(&self, path: ArcPath) -> Result<(), io::Error> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::RemoveFile { tx, path })
                    .await
                    .context("Removing file with Fs")
                    .expect("fs actor died");
                rx.await
                    .context("Awaiting response for file removal with Fs")
                    .expect("fs actor died")
            }
            Self::Mock(mock) => mock.remove_file(path).await,
        }
    }

    /// Atomically replaces `to` with `from`.
    pub async fn rename(&self, from: ArcPath, to: ArcPath) -> Result<(), io::Error> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Rename { tx, from, to })
                    .await
                    .context("Renaming file with Fs")
                    .expect("fs actor died");
                rx.await
                    .context("Awaiting response for file rename with Fs")
                    .expect("fs actor died")
            }
            Self::Mock(mock) => mock.rename(from, to).await,
        }
    }

    /// Lists the entries of a directory.
    pub async fn read_dir(&self, path: ArcPath) -> Result<LinkedList<ArcPath>, io::Error> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::ReadDir { tx, path })
                    .await
                    .context("Reading directory with Fs")
                    .expect("fs actor died");
                rx.await
                    .context("Awaiting response for directory read with Fs")
                    .expect("fs actor died")
            }
            Self::Mock(mock) => mock.read_dir(path).await,
        }
    }

    /// Creates a directory and all of its missing parents.
    pub async fn mkdir(&self, path: ArcPath) -> Result<(), io::Error> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::MkDir { tx, path })
                    .await
                    .context("Creating directory with Fs")
                    .expect("fs actor died");
                rx.await
                    .context("Awaiting response for directory creation with Fs")
                    .expect("fs actor died")
            }
            Self::Mock(mock) => mock.mkdir(path).await,
        }
    }
}
