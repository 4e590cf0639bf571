use std::io;

use anyhow::Context;
use chrono::{DateTime, Utc};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    task::JoinHandle,
};

use super::{
    FeedStore,
    data::{CachedFeed, LocalFeedImage},
    message::Message,
};
use crate::{
    ArcPath,
    cache::StoreError,
    config::{Config, PathOpt},
    fs::Fs,
    log::Log,
};

const SCOPE: &str = "cache.store";

/// Name of the cache file inside the cache directory.
pub const CACHE_FILE: &str = "feed.toml";
const CACHE_TMP_FILE: &str = "feed.toml.tmp";

/// The core of the file-backed feed store.
///
/// It keeps a single [`CachedFeed`] as TOML in `<cache_dir>/feed.toml`. New
/// snapshots are written to a sibling temporary file and renamed over the
/// cache file, so readers never observe a partial write.
#[derive(Debug)]
pub struct Core {
    fs: Fs,
    log: Log,
    /// Directory holding the cache file
    cache_dir: ArcPath,
}

impl Core {
    /// Creates a store in the cache directory found in `config`.
    pub async fn new(fs: Fs, config: Config, log: Log) -> Self {
        let cache_dir = config.path(PathOpt::CacheDir).await;
        Self::with_cache_dir(fs, cache_dir, log)
    }

    pub fn with_cache_dir(fs: Fs, cache_dir: ArcPath, log: Log) -> Self {
        Self { fs, log, cache_dir }
    }

    /// Transforms the store core into an actor. Messages are handled one at a
    /// time, so writes never interleave.
    pub fn spawn(self) -> (FeedStore, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);

        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    Message::Delete { tx } => {
                        let res = self.log.info_on_error(SCOPE, self.delete().await);
                        let _ = tx.send(res.map_err(StoreError::from));
                    }
                    Message::Insert {
                        feed,
                        timestamp,
                        tx,
                    } => {
                        let res = self
                            .log
                            .info_on_error(SCOPE, self.insert(feed, timestamp).await);
                        let _ = tx.send(res.map_err(StoreError::from));
                    }
                    Message::Retrieve { tx } => {
                        let res = self.log.info_on_error(SCOPE, self.retrieve().await);
                        let _ = tx.send(res.map_err(StoreError::from));
                    }
                }
            }
        });

        (FeedStore::Actual(tx), handle)
    }

    fn cache_path(&self) -> ArcPath {
        ArcPath::from(self.cache_dir.join(CACHE_FILE))
    }

    /// Removing an absent cache file is a success.
    async fn delete(&self) -> anyhow::Result<()> {
        let path = self.cache_path();
        match self.fs.remove_file(path.clone()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove cache file: {}", path.display())),
        }
    }

    async fn insert(
        &self,
        feed: Vec<LocalFeedImage>,
        timestamp: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let path = self.cache_path();
        let tmp_path = ArcPath::from(self.cache_dir.join(CACHE_TMP_FILE));

        let contents = toml::to_string(&CachedFeed { timestamp, feed })
            .context("Failed to serialize the feed")?;

        self.fs.mkdir(self.cache_dir.clone()).await.with_context(|| {
            format!(
                "Failed to create cache directory: {}",
                self.cache_dir.display()
            )
        })?;

        let mut file = self
            .fs
            .write_file(tmp_path.clone())
            .await
            .with_context(|| format!("Failed to create file: {}", tmp_path.display()))?;
        file.write_all(contents.as_bytes())
            .await
            .with_context(|| format!("Failed to write file: {}", tmp_path.display()))?;
        file.sync_all().await?;
        drop(file);

        self.fs
            .rename(tmp_path, path.clone())
            .await
            .with_context(|| format!("Failed to replace cache file: {}", path.display()))
    }

    /// A missing cache file is an empty cache, not an error.
    async fn retrieve(&self) -> anyhow::Result<Option<CachedFeed>> {
        let path = self.cache_path();
        let mut file = match self.fs.read_file(path.clone()).await {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open cache file: {}", path.display()));
            }
        };

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .await
            .with_context(|| format!("Failed to read cache file: {}", path.display()))?;

        let cache = toml::from_str(&contents)
            .with_context(|| format!("Corrupted cache file: {}", path.display()))?;
        Ok(Some(cache))
    }
}
