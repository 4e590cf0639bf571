use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::ArcPath;

use super::Fs;

async fn write(fs: &Fs, path: &ArcPath, content: &str) {
    let mut file = fs.write_file(path.clone()).await.unwrap();
    file.write_all(content.as_bytes()).await.unwrap();
    file.flush().await.unwrap();
}

async fn read(fs: &Fs, path: &ArcPath) -> String {
    let mut file = fs.read_file(path.clone()).await.unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).await.unwrap();
    content
}

#[tokio::test]
async fn test_fs_write_then_read() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = ArcPath::from(temp_dir.path().join("snapshot.toml"));
    let fs = Fs::spawn();

    write(&fs, &path, "first, and longer").await;
    write(&fs, &path, "second").await;

    assert_eq!(read(&fs, &path).await, "second");
}

#[tokio::test]
async fn test_fs_append_keeps_previous_content() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = ArcPath::from(temp_dir.path().join("latest.log"));
    let fs = Fs::spawn();

    for line in ["a\n", "b\n"] {
        let mut file = fs.append_file(path.clone()).await.unwrap();
        file.write_all(line.as_bytes()).await.unwrap();
        file.flush().await.unwrap();
    }

    assert_eq!(read(&fs, &path).await, "a\nb\n");
}

#[tokio::test]
async fn test_fs_read_missing_file_is_not_found() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = ArcPath::from(temp_dir.path().join("missing"));
    let fs = Fs::spawn();

    let result = fs.read_file(path).await;
    assert!(matches!(result, Err(e) if e.kind() == std::io::ErrorKind::NotFound));
}

#[tokio::test]
async fn test_fs_rename_replaces_destination() {
    let temp_dir = tempfile::tempdir().unwrap();
    let from = ArcPath::from(temp_dir.path().join("feed.toml.tmp"));
    let to = ArcPath::from(temp_dir.path().join("feed.toml"));
    let fs = Fs::spawn();

    write(&fs, &to, "old").await;
    write(&fs, &from, "new").await;
    fs.rename(from.clone(), to.clone()).await.unwrap();

    assert_eq!(read(&fs, &to).await, "new");
    assert!(fs.read_file(from).await.is_err());
}

#[tokio::test]
async fn test_fs_mkdir_read_dir_remove() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = ArcPath::from(temp_dir.path().join("nested").join("dir"));
    let file = ArcPath::from(dir.join("entry.txt"));
    let fs = Fs::spawn();

    fs.mkdir(dir.clone()).await.unwrap();
    assert!(fs.read_dir(dir.clone()).await.unwrap().is_empty());

    write(&fs, &file, "x").await;
    assert_eq!(fs.read_dir(dir.clone()).await.unwrap().len(), 1);

    fs.remove_file(file).await.unwrap();
    assert!(fs.read_dir(dir).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fs_mock_resolves_absolute_paths_inside_its_root() {
    let fs = Fs::mock();
    let dir = ArcPath::from(Path::new("/var/feed-cache"));
    let path = ArcPath::from(Path::new("/var/feed-cache/feed.toml"));

    fs.mkdir(dir.clone()).await.unwrap();
    write(&fs, &path, "mocked").await;

    assert_eq!(read(&fs, &path).await, "mocked");
    assert_eq!(fs.read_dir(dir).await.unwrap().len(), 1);
}
