use chrono::{Duration, Utc};
use herald::coord::history::{HistoryEntry, MAX_ENTRIES};
use herald::coord::{hash_content, DedupStore, HistoryStore};
use std::fs;

#[test]
fn first_play_is_new_and_repeat_is_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::in_dir(dir.path());
    let hash = hash_content("Claude is done");

    assert!(store.check_and_record(&hash));
    assert!(!store.check_and_record(&hash));
    assert!(store.is_duplicate(&hash));
}

#[test]
fn entries_expire_after_window() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::in_dir(dir.path());
    let start = Utc::now();

    assert!(store.check_and_record_at("abc", start));
    assert!(!store.check_and_record_at("abc", start + Duration::minutes(4)));
    assert!(store.check_and_record_at("abc", start + Duration::minutes(5)));
}

#[test]
fn duplicate_check_does_not_extend_entry() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::in_dir(dir.path());
    let start = Utc::now();

    assert!(store.check_and_record_at("abc", start));
    assert!(!store.check_and_record_at("abc", start + Duration::minutes(3)));
    assert!(!store.is_duplicate_at("abc", start + Duration::minutes(6)));
}

#[test]
fn history_is_capped_oldest_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::in_dir(dir.path());
    let start = Utc::now();

    for i in 0..15 {
        let now = start + Duration::seconds(i);
        assert!(store.check_and_record_at(&format!("h{i}"), now));
        assert!(store.entries_at(now).len() <= MAX_ENTRIES);
    }

    let now = start + Duration::seconds(15);
    let hashes: Vec<String> = store.entries_at(now).into_iter().map(|e| e.hash).collect();
    let expected: Vec<String> = (5..15).map(|i| format!("h{i}")).collect();
    assert_eq!(hashes, expected);
    assert!(!store.is_duplicate_at("h0", now));
}

#[test]
fn record_skips_existing_hash() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::in_dir(dir.path());
    let now = Utc::now();

    store.record_at("abc", now);
    store.record_at("abc", now + Duration::seconds(1));

    assert_eq!(store.entries_at(now + Duration::seconds(2)).len(), 1);
}

#[test]
fn corrupt_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::in_dir(dir.path());
    fs::write(store.path(), "{not json").unwrap();

    assert!(!store.is_duplicate("abc"));
    assert!(store.check_and_record("abc"));

    let raw = fs::read_to_string(store.path()).unwrap();
    let entries: Vec<HistoryEntry> = serde_json::from_str(&raw).unwrap();
    assert_eq!(entries.len(), 1);
}

#[test]
fn missing_directory_is_created_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::in_dir(&dir.path().join("nested").join("herald"));

    assert!(store.check_and_record("abc"));
    assert!(store.path().exists());
}

#[test]
fn clear_forgets_everything() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::in_dir(dir.path());

    store.record("abc");
    store.clear().unwrap();

    assert!(!store.is_duplicate("abc"));
}

#[test]
fn hash_is_fixed_length_and_content_sensitive() {
    let a = hash_content("Claude needs permission");
    let b = hash_content("Claude needs more information");

    assert_eq!(a.len(), 16);
    assert_eq!(a, hash_content("Claude needs permission"));
    assert_ne!(a, b);
}
