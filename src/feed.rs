use url::Url;
use uuid::Uuid;

/// A single image of the feed, as the rest of the application sees it.
///
/// This is the only shape that crosses module boundaries. The cache and the
/// remote API each keep their own representation and convert through `From`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedImage {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}

impl FeedImage {
    pub fn new(
        id: Uuid,
        description: Option<String>,
        location: Option<String>,
        url: Url,
    ) -> Self {
        Self {
            id,
            description,
            location,
            url,
        }
    }
}
