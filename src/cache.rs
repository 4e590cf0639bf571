mod error;
pub mod local;
mod policy;
pub mod store;

pub use error::{LocalFeedError, StoreError};
pub use local::{Clock, LoadResult, LocalFeedLoader, SaveResult, ValidationResult, complete};
pub use policy::FeedCachePolicy;
pub use store::{CachedFeed, FeedStore, LocalFeedImage};
