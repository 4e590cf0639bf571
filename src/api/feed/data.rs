use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::feed::FeedImage;

/// A feed image as served by the remote API. The image location travels as
/// `image` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFeedItem {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub image: Url,
}

/// Top-level body of a feed response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteFeedPage {
    pub items: Vec<RemoteFeedItem>,
}

impl From<RemoteFeedItem> for FeedImage {
    fn from(item: RemoteFeedItem) -> Self {
        FeedImage {
            id: item.id,
            description: item.description,
            location: item.location,
            url: item.image,
        }
    }
}

impl From<FeedImage> for RemoteFeedItem {
    fn from(image: FeedImage) -> Self {
        RemoteFeedItem {
            id: image.id,
            description: image.description,
            location: image.location,
            image: image.url,
        }
    }
}
