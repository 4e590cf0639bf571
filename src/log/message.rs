use tokio::sync::oneshot;

use super::data::LogMessage;

/// Messages that can be sent to a [`LogCore`](super::core::LogCore) actor.
#[derive(Debug)]
pub enum Message {
    /// Logs a message with the specified level and content
    Log(LogMessage),
    /// Prints buffered messages to stderr and stops the actor. The sender is
    /// answered once every earlier message was written.
    Flush { tx: oneshot::Sender<()> },
    /// Deletes log files older than the configured maximum age
    CollectGarbage,
}
