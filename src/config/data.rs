use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ArcPath, ArcStr, log::LogLevel};

/// Options for path-based configuration values that can be accessed and modified.
#[derive(Debug, Clone, Copy)]
pub enum PathOpt {
    /// Directory where log files are stored
    LogDir,
    /// Directory holding the cached feed
    CacheDir,
}

/// Options for numeric configuration values that can be accessed and modified.
#[derive(Debug, Clone, Copy)]
pub enum USizeOpt {
    /// Maximum age of log files in days before they are deleted, 0 disables cleanup
    LogMaxAge,
    /// Timeout for network requests in seconds
    Timeout,
}

/// Every configurable value of the application.
///
/// Keys missing from a configuration file fall back to their default, so a
/// partial file is always valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Data {
    /// Directory holding the cached feed
    cache_dir: ArcPath,
    /// Directory where log files are stored
    log_dir: ArcPath,
    /// Minimum level of messages printed to stderr
    log_level: LogLevel,
    /// Maximum age of log files in days
    log_max_age: usize,
    /// Timeout for network requests in seconds
    timeout: usize,
    /// Endpoint the remote feed is fetched from
    #[serde(skip_serializing_if = "Option::is_none")]
    feed_url: Option<ArcStr>,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            cache_dir: ArcPath::from(Path::new("/tmp/feed-cache/cache")),
            log_dir: ArcPath::from(Path::new("/tmp/feed-cache/logs")),
            log_level: LogLevel::Warning,
            log_max_age: 0,
            timeout: 30,
            feed_url: None,
        }
    }
}

impl Data {
    pub fn path(&self, opt: PathOpt) -> ArcPath {
        match opt {
            PathOpt::LogDir => self.log_dir.clone(),
            PathOpt::CacheDir => self.cache_dir.clone(),
        }
    }

    pub fn set_path(&mut self, opt: PathOpt, path: ArcPath) {
        match opt {
            PathOpt::LogDir => self.log_dir = path,
            PathOpt::CacheDir => self.cache_dir = path,
        }
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }

    pub fn usize(&self, opt: USizeOpt) -> usize {
        match opt {
            USizeOpt::LogMaxAge => self.log_max_age,
            USizeOpt::Timeout => self.timeout,
        }
    }

    pub fn set_usize(&mut self, opt: USizeOpt, value: usize) {
        match opt {
            USizeOpt::LogMaxAge => self.log_max_age = value,
            USizeOpt::Timeout => self.timeout = value,
        }
    }

    pub fn feed_url(&self) -> Option<ArcStr> {
        self.feed_url.clone()
    }

    pub fn set_feed_url(&mut self, url: Option<ArcStr>) {
        self.feed_url = url;
    }
}
