use std::fs;

use chrono::NaiveDate;
use partition_store::{Category, DateMode, PartitionKey, PartitionStore, Timeframe};
use tempfile::TempDir;

fn store() -> (TempDir, PartitionStore) {
    let dir = TempDir::new().expect("tempdir");
    let store = PartitionStore::new(dir.path().join("storage"));
    (dir, store)
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 3).unwrap()
}

fn tf(s: &str) -> Timeframe {
    s.parse().unwrap()
}

#[test]
fn kline_dated_layout() {
    let (_tmp, store) = store();
    let key = PartitionKey::dated(Category::Kline, date())
        .with_symbol("BTCUSDT")
        .unwrap()
        .with_timeframe(tf("15m"))
        .unwrap();

    let path = store.resolve_partition(&key).unwrap();
    assert!(path.is_dir());
    assert_eq!(
        path,
        store.root().join("Kline").join("Date").join("10-03-2024").join("BTCUSDT").join("15m")
    );
    insta::assert_snapshot!(key.to_string(), @"Kline/Date/10-03-2024/BTCUSDT/15m");
}

#[test]
fn kline_historical_has_no_date_segment() {
    let (_tmp, store) = store();
    let key = PartitionKey::new(Category::Kline, DateMode::Historical)
        .unwrap()
        .with_symbol("BTCUSDT")
        .unwrap()
        .with_timeframe(tf("1m"))
        .unwrap();

    let path = store.resolve_partition(&key).unwrap();
    assert!(path.is_dir());
    insta::assert_snapshot!(key.to_string(), @"Kline/Historical/BTCUSDT/1m");
}

#[test]
fn processed_and_indicator_layouts() {
    let (_tmp, store) = store();
    let processed = PartitionKey::dated(Category::Processed, date())
        .with_symbol("ETHUSDT")
        .unwrap()
        .with_timeframe(tf("240m"))
        .unwrap();
    let indicator = PartitionKey::dated(Category::Indicator, date())
        .with_symbol("ETHUSDT")
        .unwrap();

    assert!(store.resolve_partition(&processed).unwrap().is_dir());
    assert!(store.resolve_partition(&indicator).unwrap().is_dir());
    insta::assert_snapshot!(processed.to_string(), @"Processed/10-03-2024/ETHUSDT/240m");
    insta::assert_snapshot!(indicator.to_string(), @"Indicator/10-03-2024/ETHUSDT");
}

#[test]
fn omitted_segments_address_the_parent() {
    let (_tmp, store) = store();
    let parent = PartitionKey::dated(Category::Kline, date());
    let child = parent.clone().with_symbol("SOLUSDT").unwrap();

    let parent_dir = store.resolve_partition(&parent).unwrap();
    let child_dir = store.resolve_partition(&child).unwrap();
    assert_eq!(child_dir.parent().unwrap(), parent_dir);
}

#[test]
fn resolve_is_idempotent_and_non_destructive() {
    let (_tmp, store) = store();
    let key = PartitionKey::dated(Category::Kline, date())
        .with_symbol("ARBUSDT")
        .unwrap()
        .with_timeframe(tf("30m"))
        .unwrap();

    let first = store.resolve_partition(&key).unwrap();
    fs::write(first.join("keep.txt"), b"data").unwrap();
    let second = store.resolve_partition(&key).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read(second.join("keep.txt")).unwrap(), b"data");
}

#[test]
fn invalid_mode_creates_nothing() {
    let (_tmp, store) = store();
    let err = PartitionKey::parse("Kline", "InvalidMode", Some(date()), Some("BTCUSDT"), Some("1m"))
        .unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(!store.root().exists());
}

#[test]
fn historical_processed_is_rejected() {
    let err =
        PartitionKey::parse("Processed", "Historical", None, Some("BTCUSDT"), None).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn sibling_timeframes_share_parents() {
    let (_tmp, store) = store();
    let base = PartitionKey::dated(Category::Kline, date()).with_symbol("BTCUSDT").unwrap();

    std::thread::scope(|s| {
        for t in ["15m", "30m", "60m", "240m"] {
            let key = base.clone().with_timeframe(tf(t)).unwrap();
            let store = &store;
            s.spawn(move || store.resolve_partition(&key).unwrap());
        }
    });

    let symbol_dir = store.partition_path(&base);
    assert_eq!(fs::read_dir(symbol_dir).unwrap().count(), 4);
}

#[test]
fn timeframe_without_symbol_sits_under_the_date() {
    let (_tmp, store) = store();
    let key = PartitionKey::parse("Kline", "Date", Some(date()), None, Some("15m")).unwrap();

    let path = store.resolve_partition(&key).unwrap();
    assert!(path.is_dir());
    insta::assert_snapshot!(key.to_string(), @"Kline/Date/10-03-2024/15m");
}
