use std::{collections::LinkedList, io};

use tokio::{
    fs::{File, OpenOptions},
    sync::{mpsc, oneshot},
};

use crate::ArcPath;

use super::message::Message;

/// The core of the Fs actor, responsible for handling filesystem operations.
///
/// Every request opens its own handle, so no file descriptors are shared
/// between callers.
#[derive(Debug, Default)]
pub struct Core;

impl Core {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn spawn(self) -> (super::Fs, tokio::task::JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                use Message::*;
                match msg {
                    ReadFile { tx, path } => {
                        let _ = tx.send(OpenOptions::new().read(true).open(&path).await);
                    }
                    WriteFile { tx, path } => Self::write_file(tx, path).await,
                    AppendFile { tx, path } => Self::append_file(tx, path).await,
                    RemoveFile { tx, path } => {
                        let _ = tx.send(tokio::fs::remove_file(&path).await);
                    }
                    Rename { tx, from, to } => {
                        let _ = tx.send(tokio::fs::rename(&from, &to).await);
                    }
                    ReadDir { tx, path } => Self::read_dir(tx, path).await,
                    MkDir { tx, path } => {
                        let _ = tx.send(tokio::fs::create_dir_all(&path).await);
                    }
                }
            }
        });
        (super::Fs::Actual(tx), handle)
    }

    async fn write_file(tx: oneshot::Sender<Result<File, io::Error>>, path: ArcPath) {
        let res = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .await;
        let _ = tx.send(res);
    }

    async fn append_file(tx: oneshot::Sender<Result<File, io::Error>>, path: ArcPath) {
        let res = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await;
        let _ = tx.send(res);
    }

    async fn read_dir(tx: oneshot::Sender<Result<LinkedList<ArcPath>, io::Error>>, path: ArcPath) {
        match tokio::fs::read_dir(&path).await {
            Ok(mut rd) => {
                let mut entries = LinkedList::new();
                let res = loop {
                    match rd.next_entry().await {
                        Ok(Some(entry)) => entries.push_back(ArcPath::from(entry.path())),
                        Ok(None) => break Ok(entries),
                        Err(e) => break Err(e),
                    }
                };
                let _ = tx.send(res);
            }
            Err(e) => {
                let _ = tx.send(Err(e));
            }
        }
    }
}
