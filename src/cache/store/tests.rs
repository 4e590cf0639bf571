use std::path::Path;

use chrono::TimeDelta;
use tokio::io::AsyncWriteExt;
use url::Url;
use uuid::Uuid;

use super::core::{CACHE_FILE, Core};
use super::*;
use crate::{
    ArcPath,
    config::{Data, PathOpt},
};

fn cache_dir() -> ArcPath {
    ArcPath::from(Path::new("/var/cache/feed"))
}

fn make_sut(fs: &Fs) -> FeedStore {
    let (store, _) = Core::with_cache_dir(fs.clone(), cache_dir(), Log::mock()).spawn();
    store
}

fn local_image(n: u32, described: bool) -> LocalFeedImage {
    LocalFeedImage {
        id: Uuid::new_v4(),
        description: described.then(|| format!("description {n}")),
        location: described.then(|| format!("location {n}")),
        url: Url::parse(&format!("https://images.example.com/{n}.png")).unwrap(),
    }
}

fn timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

#[tokio::test]
async fn test_retrieve_delivers_empty_on_empty_cache() {
    let sut = make_sut(&Fs::mock());

    assert_eq!(sut.retrieve().await, Ok(None));
    assert_eq!(sut.retrieve().await, Ok(None));
}

#[tokio::test]
async fn test_retrieve_after_insert_delivers_inserted_values() {
    let sut = make_sut(&Fs::mock());
    let feed = vec![local_image(0, true), local_image(1, false)];

    sut.insert(feed.clone(), timestamp()).await.unwrap();

    let expected = CachedFeed {
        timestamp: timestamp(),
        feed,
    };
    assert_eq!(sut.retrieve().await, Ok(Some(expected.clone())));
    assert_eq!(sut.retrieve().await, Ok(Some(expected)));
}

#[tokio::test]
async fn test_insert_replaces_previous_snapshot() {
    let sut = make_sut(&Fs::mock());

    sut.insert(vec![local_image(0, true)], timestamp())
        .await
        .unwrap();
    let latest = vec![local_image(1, false)];
    let later = timestamp() + TimeDelta::hours(1);
    sut.insert(latest.clone(), later).await.unwrap();

    let cache = sut.retrieve().await.unwrap().unwrap();
    assert_eq!(cache.timestamp, later);
    assert_eq!(cache.feed, latest);
}

#[tokio::test]
async fn test_insert_empty_feed_is_not_an_empty_cache() {
    let sut = make_sut(&Fs::mock());

    sut.insert(vec![], timestamp()).await.unwrap();

    let cache = sut.retrieve().await.unwrap();
    assert_eq!(
        cache,
        Some(CachedFeed {
            timestamp: timestamp(),
            feed: vec![]
        })
    );
}

#[tokio::test]
async fn test_insert_leaves_no_temporary_file_behind() {
    let fs = Fs::mock();
    let sut = make_sut(&fs);

    sut.insert(vec![local_image(0, true)], timestamp())
        .await
        .unwrap();

    let entries = fs.read_dir(cache_dir()).await.unwrap();
    let names: Vec<_> = entries
        .iter()
        .filter_map(|entry| entry.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![CACHE_FILE.to_string()]);
}

#[tokio::test]
async fn test_delete_on_empty_cache_succeeds() {
    let sut = make_sut(&Fs::mock());

    assert_eq!(sut.delete().await, Ok(()));
    assert_eq!(sut.retrieve().await, Ok(None));
}

#[tokio::test]
async fn test_delete_empties_previously_inserted_cache() {
    let sut = make_sut(&Fs::mock());
    sut.insert(vec![local_image(0, true)], timestamp())
        .await
        .unwrap();

    assert_eq!(sut.delete().await, Ok(()));
    assert_eq!(sut.retrieve().await, Ok(None));
}

#[tokio::test]
async fn test_retrieve_delivers_error_on_corrupted_cache() {
    let fs = Fs::mock();
    let sut = make_sut(&fs);
    fs.mkdir(cache_dir()).await.unwrap();
    let mut file = fs
        .write_file(ArcPath::from(cache_dir().join(CACHE_FILE)))
        .await
        .unwrap();
    file.write_all(b"invalid data").await.unwrap();
    file.flush().await.unwrap();

    let result = sut.retrieve().await;

    let error = result.unwrap_err();
    assert!(error.message().contains("Corrupted cache file"));
}

#[tokio::test]
async fn test_persisted_snapshot_is_readable_by_a_new_store() {
    let fs = Fs::mock();
    let feed = vec![local_image(0, true)];
    make_sut(&fs).insert(feed.clone(), timestamp()).await.unwrap();

    let cache = make_sut(&fs).retrieve().await.unwrap().unwrap();

    assert_eq!(cache.feed, feed);
}

#[tokio::test]
async fn test_spawn_reads_cache_dir_from_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = Config::mock(Data::default());
    config
        .set_path(PathOpt::CacheDir, ArcPath::from(temp_dir.path()))
        .await;

    let sut = FeedStore::spawn(Fs::spawn(), config, Log::mock()).await;
    sut.insert(vec![local_image(0, false)], timestamp())
        .await
        .unwrap();

    assert!(temp_dir.path().join(CACHE_FILE).exists());
}

#[tokio::test]
async fn test_spy_records_requests_and_answers_on_demand() {
    let spy = mock::Mock::new();
    let sut = FeedStore::Mock(spy.clone());

    let pending = tokio::spawn({
        let sut = sut.clone();
        async move { sut.delete().await }
    });
    spy.wait_for_messages(1).await;
    spy.complete_deletion_with_error(0, StoreError::new("boom"))
        .await;

    assert_eq!(pending.await.unwrap(), Err(StoreError::new("boom")));
    assert_eq!(
        spy.received_messages().await,
        vec![ReceivedMessage::DeleteCachedFeed]
    );
}
