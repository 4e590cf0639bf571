/// Failures of the remote feed loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RemoteFeedError {
    /// No response was received from the server.
    #[error("could not reach the feed server")]
    Connectivity,
    /// A response arrived but it was not a 200 carrying a valid feed.
    #[error("the feed server answered with invalid data")]
    InvalidData,
}
