use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::{ArcPath, fs::Fs};

use super::{data::Data, message::Message};

/// The core configuration actor that handles file I/O and data management.
///
/// It owns the in-memory [`Data`] and is the only place that reads or writes
/// the configuration file.
pub struct Core {
    /// The filesystem actor for file operations
    fs: Fs,
    /// The path to the configuration file
    path: ArcPath,
    /// The current configuration data
    data: Data,
}

impl Core {
    pub fn new(fs: Fs, path: ArcPath) -> Self {
        Self {
            fs,
            path,
            data: Data::default(),
        }
    }

    /// Spawns the configuration actor and returns a handle to it.
    pub fn spawn(mut self) -> (super::Config, tokio::task::JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                match msg {
                    Message::Load { tx } => {
                        let res = self.load().await;
                        let _ = tx.send(res);
                    }
                    Message::Save { tx } => {
                        let res = self.save().await;
                        let _ = tx.send(res);
                    }
                    Message::GetPath { opt, tx } => {
                        let _ = tx.send(self.data.path(opt));
                    }
                    Message::GetLogLevel { tx } => {
                        let _ = tx.send(self.data.log_level());
                    }
                    Message::GetUSize { opt, tx } => {
                        let _ = tx.send(self.data.usize(opt));
                    }
                    Message::GetFeedUrl { tx } => {
                        let _ = tx.send(self.data.feed_url());
                    }
                    Message::SetPath { opt, path } => {
                        self.data.set_path(opt, path);
                    }
                    Message::SetLogLevel { level } => {
                        self.data.set_log_level(level);
                    }
                    Message::SetUSize { opt, size } => {
                        self.data.set_usize(opt, size);
                    }
                    Message::SetFeedUrl { url } => {
                        self.data.set_feed_url(url);
                    }
                }
            }
        });
        (super::Config::Actual(tx), handle)
    }

    /// Replaces the in-memory data with the content of the configuration file.
    /// On failure the current data is left untouched.
    async fn load(&mut self) -> anyhow::Result<()> {
        let mut file = self
            .fs
            .read_file(self.path.clone())
            .await
            .with_context(|| format!("Failed to open config file: {}", self.path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;
        self.data = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", self.path.display()))?;
        Ok(())
    }

    async fn save(&self) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(&self.data)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs.mkdir(ArcPath::from(parent)).await?;
        }
        let mut file = self
            .fs
            .write_file(self.path.clone())
            .await
            .with_context(|| format!("Failed to create config file: {}", self.path.display()))?;
        file.write_all(contents.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
