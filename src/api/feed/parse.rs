use super::data::RemoteFeedPage;
use super::error::RemoteFeedError;
use crate::{feed::FeedImage, net::HttpResponse};

const OK_200: u16 = 200;

/// Maps an HTTP response to feed images, keeping the wire order.
///
/// Only a 200 carrying a JSON `{"items": [...]}` body is accepted. Any other
/// status, including other 2xx codes, is invalid data.
pub fn map(response: &HttpResponse) -> Result<Vec<FeedImage>, RemoteFeedError> {
    if response.status != OK_200 {
        return Err(RemoteFeedError::InvalidData);
    }

    let page: RemoteFeedPage =
        serde_json::from_slice(&response.body).map_err(|_| RemoteFeedError::InvalidData)?;

    Ok(page.items.into_iter().map(FeedImage::from).collect())
}
