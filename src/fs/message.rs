use std::{collections::LinkedList, io};

use tokio::{fs::File, sync::oneshot};

use crate::ArcPath;

/// Messages that can be sent to a [`Fs`](super::Fs) actor.
#[derive(Debug)]
pub enum Message {
    /// Opens an existing file for reading
    ReadFile {
        tx: oneshot::Sender<Result<File, io::Error>>,
        path: ArcPath,
    },
    /// Opens a file for writing, truncating any previous content
    WriteFile {
        tx: oneshot::Sender<Result<File, io::Error>>,
        path: ArcPath,
    },
    /// Opens a file for appending
    AppendFile {
        tx: oneshot::Sender<Result<File, io::Error>>,
        path: ArcPath,
    },
    /// Removes a file from the filesystem
    RemoveFile {
        tx: oneshot::Sender<Result<(), io::Error>>,
        path: ArcPath,
    },
    /// Renames a file, replacing the destination if it exists
    Rename {
        tx: oneshot::Sender<Result<(), io::Error>>,
        from: ArcPath,
        to: ArcPath,
    },
    /// Reads the contents of a directory
    ReadDir {
        tx: oneshot::Sender<Result<LinkedList<ArcPath>, io::Error>>,
        path: ArcPath,
    },
    /// Creates a directory and its parents
    MkDir {
        tx: oneshot::Sender<Result<(), io::Error>>,
        path: ArcPath,
    },
}
