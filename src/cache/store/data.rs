use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::feed::FeedImage;

/// A feed image as persisted by the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalFeedImage {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub url: Url,
}

/// The single snapshot a store holds: the feed and the instant it was saved.
///
/// `timestamp` must stay declared before `feed` since TOML wants plain keys
/// ahead of arrays of tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedFeed {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub feed: Vec<LocalFeedImage>,
}

impl From<FeedImage> for LocalFeedImage {
    fn from(image: FeedImage) -> Self {
        LocalFeedImage {
            id: image.id,
            description: image.description,
            location: image.location,
            url: image.url,
        }
    }
}

impl From<LocalFeedImage> for FeedImage {
    fn from(image: LocalFeedImage) -> Self {
        FeedImage {
            id: image.id,
            description: image.description,
            location: image.location,
            url: image.url,
        }
    }
}
