use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use super::*;
use crate::{
    cache::{
        FeedStore, LocalFeedImage, StoreError,
        store::{ReceivedMessage, mock::Mock},
    },
    feed::FeedImage,
    log::Log,
};

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn make_loader() -> (Arc<LocalFeedLoader>, Mock) {
    let spy = Mock::new();
    let loader = LocalFeedLoader::new(FeedStore::Mock(spy.clone()), Arc::new(now), Log::mock());
    (loader, spy)
}

fn remote_feed() -> Vec<FeedImage> {
    ["https://a-url.com/1", "https://a-url.com/2"]
        .into_iter()
        .map(|url| FeedImage::new(Uuid::new_v4(), None, None, Url::parse(url).unwrap()))
        .collect()
}

fn remote_loads(remote: &RemoteFeedLoader) -> usize {
    match remote {
        RemoteFeedLoader::Mock(mock) => mock.loads(),
        RemoteFeedLoader::Actual(_) => unreachable!("tests only use the mock"),
    }
}

#[tokio::test]
async fn test_refresh_caches_remote_feed() {
    let feed = remote_feed();
    let local: Vec<LocalFeedImage> = feed.iter().cloned().map(LocalFeedImage::from).collect();
    let remote = RemoteFeedLoader::mock(Ok(feed));
    let (loader, spy) = make_loader();

    let task = {
        let remote = remote.clone();
        tokio::spawn(async move { refresh(&remote, &loader).await })
    };
    spy.complete_deletion(0).await;
    spy.complete_insertion(0).await;

    assert_eq!(task.await.unwrap(), Ok(2));
    assert_eq!(
        spy.received_messages().await,
        vec![
            ReceivedMessage::DeleteCachedFeed,
            ReceivedMessage::Insert(local, now())
        ]
    );
    assert_eq!(remote_loads(&remote), 1);
}

#[tokio::test]
async fn test_refresh_does_not_touch_cache_on_remote_error() {
    for error in [RemoteFeedError::Connectivity, RemoteFeedError::InvalidData] {
        let remote = RemoteFeedLoader::mock(Err(error));
        let (loader, spy) = make_loader();

        let result = refresh(&remote, &loader).await;
        tokio::task::yield_now().await;

        assert_eq!(result, Err(RefreshError::Remote(error)));
        assert!(spy.received_messages().await.is_empty());
        assert_eq!(remote_loads(&remote), 1);
    }
}

#[tokio::test]
async fn test_refresh_fails_on_deletion_error() {
    let remote = RemoteFeedLoader::mock(Ok(remote_feed()));
    let (loader, spy) = make_loader();
    let error = StoreError::new("deletion failed");

    let task = tokio::spawn(async move { refresh(&remote, &loader).await });
    spy.complete_deletion_with_error(0, error.clone()).await;

    assert_eq!(
        task.await.unwrap(),
        Err(RefreshError::Cache(LocalFeedError::Deletion(error)))
    );
    assert_eq!(
        spy.received_messages().await,
        vec![ReceivedMessage::DeleteCachedFeed]
    );
}

#[tokio::test]
async fn test_refresh_fails_on_insertion_error() {
    let remote = RemoteFeedLoader::mock(Ok(remote_feed()));
    let (loader, spy) = make_loader();
    let error = StoreError::new("insertion failed");

    let task = tokio::spawn(async move { refresh(&remote, &loader).await });
    spy.complete_deletion(0).await;
    spy.complete_insertion_with_error(0, error.clone()).await;

    assert_eq!(
        task.await.unwrap(),
        Err(RefreshError::Cache(LocalFeedError::Insertion(error)))
    );
}
