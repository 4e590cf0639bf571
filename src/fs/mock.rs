use std::{
    collections::LinkedList,
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use tempfile::TempDir;
use tokio::fs::{File, OpenOptions};

use crate::ArcPath;

/// Mock implementation of the Fs actor for testing purposes.
///
/// Every path, absolute or relative, is resolved inside a temporary directory
/// that lives as long as the last clone of the mock. Entries returned by
/// [`Mock::read_dir`] are real paths inside that directory.
#[derive(Debug, Clone)]
pub struct Mock {
    root: Arc<TempDir>,
}

impl Mock {
    /// Creates a new mock instance with a temporary directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir for Fs mock");
        Self {
            root: Arc::new(root),
        }
    }

    /// Maps a caller path to its location inside the temporary directory.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.starts_with(self.root.path()) {
            return path.to_path_buf();
        }
        let relative = path.strip_prefix("/").unwrap_or(path);
        self.root.path().join(relative)
    }

    pub async fn read_file(&self, path: ArcPath) -> Result<File, io::Error> {
        OpenOptions::new()
            .read(true)
            .open(self.resolve(&path))
            .await
    }

    pub async fn write_file(&self, path: ArcPath) -> Result<File, io::Error> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.resolve(&path))
            .await
    }

    pub async fn append_file(&self, path: ArcPath) -> Result<File, io::Error> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.resolve(&path))
            .await
    }

    pub async fn remove_file(&self, path: ArcPath) -> Result<(), io::Error> {
        tokio::fs::remove_file(self.resolve(&path)).await
    }

    pub async fn rename(&self, from: ArcPath, to: ArcPath) -> Result<(), io::Error> {
        tokio::fs::rename(self.resolve(&from), self.resolve(&to)).await
    }

    pub async fn read_dir(&self, path: ArcPath) -> Result<LinkedList<ArcPath>, io::Error> {
        let mut entries = LinkedList::new();
        let mut rd = tokio::fs::read_dir(self.resolve(&path)).await?;
        while let Some(entry) = rd.next_entry().await? {
            entries.push_back(ArcPath::from(entry.path()));
        }
        Ok(entries)
    }

    pub async fn mkdir(&self, path: ArcPath) -> Result<(), io::Error> {
        tokio::fs::create_dir_all(self.resolve(&path)).await
    }
}
