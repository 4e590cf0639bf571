use tokio::sync::oneshot;

use crate::{ArcPath, ArcStr, log::LogLevel};

use super::data::{PathOpt, USizeOpt};

/// Messages that can be sent to the configuration actor.
///
/// Getters and fallible operations carry a channel to send the result back to
/// the caller. Setters are fire and forget.
#[derive(Debug)]
pub enum Message {
    /// Load configuration from file
    Load {
        tx: oneshot::Sender<anyhow::Result<()>>,
    },
    /// Save configuration to file
    Save {
        tx: oneshot::Sender<anyhow::Result<()>>,
    },
    GetPath {
        opt: PathOpt,
        tx: oneshot::Sender<ArcPath>,
    },
    GetLogLevel {
        tx: oneshot::Sender<LogLevel>,
    },
    GetUSize {
        opt: USizeOpt,
        tx: oneshot::Sender<usize>,
    },
    GetFeedUrl {
        tx: oneshot::Sender<Option<ArcStr>>,
    },
    SetPath {
        opt: PathOpt,
        path: ArcPath,
    },
    SetLogLevel {
        level: LogLevel,
    },
    SetUSize {
        opt: USizeOpt,
        size: usize,
    },
    SetFeedUrl {
        url: Option<ArcStr>,
    },
}
