use std::str::FromStr;

use tokio::io::AsyncReadExt;

use super::*;
use crate::ArcPath;

#[test]
fn test_log_level_ordering() {
    assert!(LogLevel::Info < LogLevel::Warning);
    assert!(LogLevel::Warning < LogLevel::Error);
}

#[test]
fn test_log_level_from_str() {
    assert_eq!(LogLevel::from_str("INFO").unwrap(), LogLevel::Info);
    assert_eq!(LogLevel::from_str("warn").unwrap(), LogLevel::Warning);
    assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warning);
    assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);
    assert!(LogLevel::from_str("verbose").is_err());
}

#[test]
fn test_log_message_display() {
    let output = LogMessage::new(LogLevel::Error, "cache.store", "disk full").to_string();
    assert!(output.contains("[ERROR]"));
    assert!(output.contains("[cache.store]"));
    assert!(output.ends_with("disk full"));
    assert_eq!(output.matches('[').count(), 3);
}

#[tokio::test]
async fn test_mock_records_messages_in_order() {
    let log = Log::mock();
    log.info("test", "test message");
    log.warn("test", "warning message");

    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    let messages = log.get_messages().await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].level, LogLevel::Info);
    assert_eq!(messages[0].message, "test message");
    assert_eq!(messages[1].level, LogLevel::Warning);
    assert_eq!(messages[1].scope, "test");
}

#[tokio::test]
async fn test_on_error_helpers_pass_results_through() {
    let log = Log::mock();
    let ok: Result<u32, &str> = Ok(42);
    let err: Result<u32, &str> = Err("fail");

    assert_eq!(log.warn_on_error("test", ok), Ok(42));
    assert_eq!(log.error_on_error("test", err), Err("fail"));

    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    let messages = log.get_messages().await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].level, LogLevel::Error);
    assert_eq!(messages[0].message, "fail");
}

#[tokio::test]
async fn test_actual_logger_writes_latest_log() {
    let temp_dir = tempfile::tempdir().unwrap();
    let log_dir = ArcPath::from(temp_dir.path().join("logs"));
    let fs = crate::fs::Fs::spawn();

    let (log, handle) = super::core::LogCore::build(fs.clone(), LogLevel::Error, 0, log_dir.clone())
        .await
        .unwrap()
        .spawn();

    log.info("test", "written to file");
    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    let _ = log.flush().await;
    handle.await.unwrap();

    let mut latest = fs
        .read_file(ArcPath::from(log_dir.join("latest.log")))
        .await
        .unwrap();
    let mut content = String::new();
    latest.read_to_string(&mut content).await.unwrap();
    assert!(content.contains("[INFO] [test] written to file"));

    let entries = fs.read_dir(log_dir).await.unwrap();
    assert!(entries.iter().any(|entry| {
        entry
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with(super::core::LOG_FILE_PREFIX))
    }));
}

#[tokio::test]
async fn test_collect_garbage_keeps_fresh_logs() {
    let fs = crate::fs::Fs::mock();
    let log_dir = ArcPath::from(std::path::Path::new("logs"));

    let log = Log::spawn(fs.clone(), LogLevel::Warning, 7, log_dir.clone())
        .await
        .unwrap();
    log.collect_garbage().await;
    tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;

    // the current log and latest.log are both younger than a day
    assert_eq!(fs.read_dir(log_dir).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_flush_waits_for_earlier_messages_in_order() {
    let temp_dir = tempfile::tempdir().unwrap();
    let log_dir = ArcPath::from(temp_dir.path().join("logs"));
    let fs = crate::fs::Fs::spawn();

    let log = Log::spawn(fs.clone(), LogLevel::Error, 0, log_dir.clone())
        .await
        .unwrap();

    for i in 0..20 {
        log.info("test", format!("entry {i}"));
    }
    log.flush().await.unwrap();

    let mut latest = fs
        .read_file(ArcPath::from(log_dir.join("latest.log")))
        .await
        .unwrap();
    let mut content = String::new();
    latest.read_to_string(&mut content).await.unwrap();
    let entries: Vec<_> = content
        .lines()
        .filter_map(|line| line.rsplit("] ").next())
        .collect();
    let expected: Vec<_> = (0..20).map(|i| format!("entry {i}")).collect();
    assert_eq!(entries, expected);
}
