use std::collections::HashMap;

use serde_json::{Value, json};
use uuid::Uuid;

use super::*;
use crate::{ArcStr, net::HttpResponse};

const FEED_URL: &str = "https://a-given-url.com/feed";

fn feed_url() -> Url {
    Url::parse(FEED_URL).unwrap()
}

fn make_item(
    description: Option<&str>,
    location: Option<&str>,
    image: &str,
) -> (FeedImage, Value) {
    let image = FeedImage::new(
        Uuid::new_v4(),
        description.map(String::from),
        location.map(String::from),
        Url::parse(image).unwrap(),
    );

    let mut json = json!({
        "id": image.id,
        "image": image.url,
    });
    if let Some(description) = &image.description {
        json["description"] = json!(description);
    }
    if let Some(location) = &image.location {
        json["location"] = json!(location);
    }

    (image, json)
}

fn items_body(items: &[Value]) -> Vec<u8> {
    serde_json::to_vec(&json!({ "items": items })).unwrap()
}

fn make_sut(response: Option<HttpResponse>) -> (RemoteFeedLoader, Net) {
    let mut responses = HashMap::new();
    if let Some(response) = response {
        responses.insert(ArcStr::from(FEED_URL), response);
    }
    let net = Net::mock(responses);
    let sut = RemoteFeedLoader::spawn(net.clone(), feed_url(), Log::mock());
    (sut, net)
}

#[tokio::test]
async fn test_spawn_does_not_request_data() {
    let (_sut, net) = make_sut(None);
    tokio::task::yield_now().await;

    assert_eq!(net.requests().await, Some(vec![]));
}

#[tokio::test]
async fn test_load_requests_data_from_url() {
    let (sut, net) = make_sut(Some(HttpResponse::new(200, items_body(&[]))));

    let _ = sut.load().await;
    let _ = sut.load().await;

    assert_eq!(
        net.requests().await,
        Some(vec![ArcStr::from(FEED_URL), ArcStr::from(FEED_URL)])
    );
}

#[tokio::test]
async fn test_load_delivers_connectivity_error_on_client_error() {
    let (sut, _) = make_sut(None);

    assert_eq!(sut.load().await, Err(RemoteFeedError::Connectivity));
}

#[tokio::test]
async fn test_load_delivers_invalid_data_on_non_200_response() {
    for status in [199, 201, 300, 400, 500] {
        let (sut, _) = make_sut(Some(HttpResponse::new(status, items_body(&[]))));

        assert_eq!(
            sut.load().await,
            Err(RemoteFeedError::InvalidData),
            "status {status}"
        );
    }
}

#[tokio::test]
async fn test_load_delivers_invalid_data_on_200_with_invalid_json() {
    let (sut, _) = make_sut(Some(HttpResponse::new(200, b"invalid json".to_vec())));

    assert_eq!(sut.load().await, Err(RemoteFeedError::InvalidData));
}

#[tokio::test]
async fn test_load_delivers_invalid_data_on_item_without_image() {
    let body = serde_json::to_vec(&json!({
        "items": [{ "id": Uuid::new_v4() }]
    }))
    .unwrap();
    let (sut, _) = make_sut(Some(HttpResponse::new(200, body)));

    assert_eq!(sut.load().await, Err(RemoteFeedError::InvalidData));
}

#[tokio::test]
async fn test_load_delivers_no_items_on_200_with_empty_list() {
    let (sut, _) = make_sut(Some(HttpResponse::new(200, items_body(&[]))));

    assert_eq!(sut.load().await, Ok(vec![]));
}

#[tokio::test]
async fn test_load_delivers_items_on_200_in_wire_order() {
    let (first, first_json) = make_item(None, None, "http://a-url.com");
    let (second, second_json) = make_item(
        Some("a description"),
        Some("a location"),
        "http://another-url.com",
    );
    let (sut, _) = make_sut(Some(HttpResponse::new(
        200,
        items_body(&[first_json, second_json]),
    )));

    assert_eq!(sut.load().await, Ok(vec![first, second]));
}

#[tokio::test]
async fn test_mock_returns_preset_result() {
    let sut = RemoteFeedLoader::mock(Err(RemoteFeedError::Connectivity));

    assert_eq!(sut.load().await, Err(RemoteFeedError::Connectivity));
    let RemoteFeedLoader::Mock(mock) = &sut else {
        panic!("expected a mock loader");
    };
    assert_eq!(mock.loads(), 1);
}

#[test]
fn test_remote_item_renames_image_to_url() {
    let (image, json) = make_item(Some("desc"), None, "https://img.example.com/1.png");

    let item: RemoteFeedItem = serde_json::from_value(json).unwrap();
    assert_eq!(item.image, image.url);
    assert_eq!(FeedImage::from(item.clone()), image);
    assert_eq!(RemoteFeedItem::from(image), item);
}
