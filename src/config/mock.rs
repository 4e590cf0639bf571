use std::sync::Arc;
use tokio::sync::Mutex;

use super::data::{Data, PathOpt, USizeOpt};
use crate::{ArcPath, ArcStr, log::LogLevel};

/// Mock implementation of the Config actor for testing purposes.
///
/// Data lives in memory only, so loading and saving always succeed.
#[derive(Debug, Clone)]
pub struct Mock {
    data: Arc<Mutex<Data>>,
}

impl Mock {
    pub fn new(data: Data) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    pub async fn load(&self) -> anyhow::Result<()> {
        Ok(())
    }

    pub async fn save(&self) -> anyhow::Result<()> {
        Ok(())
    }

    pub async fn path(&self, opt: PathOpt) -> ArcPath {
        self.data.lock().await.path(opt)
    }

    pub async fn set_path(&self, opt: PathOpt, path: ArcPath) {
        self.data.lock().await.set_path(opt, path);
    }

    pub async fn log_level(&self) -> LogLevel {
        self.data.lock().await.log_level()
    }

    pub async fn set_log_level(&self, level: LogLevel) {
        self.data.lock().await.set_log_level(level);
    }

    pub async fn usize(&self, opt: USizeOpt) -> usize {
        self.data.lock().await.usize(opt)
    }

    pub async fn set_usize(&self, opt: USizeOpt, value: usize) {
        self.data.lock().await.set_usize(opt, value);
    }

    pub async fn feed_url(&self) -> Option<ArcStr> {
        self.data.lock().await.feed_url()
    }

    pub async fn set_feed_url(&self, url: Option<ArcStr>) {
        self.data.lock().await.set_feed_url(url);
    }

    /// Returns a copy of the current data for inspection in tests.
    pub async fn get_data(&self) -> Data {
        self.data.lock().await.clone()
    }
}
