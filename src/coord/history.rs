use super::DedupStore;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEDUP_WINDOW: Duration = Duration::from_secs(5 * 60);
pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub hash: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Recent-play history persisted as a JSON array, oldest first.
///
/// Performs no locking of its own. Storage errors are logged and read as an
/// empty history: the worst case is one repeated announcement.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("recent.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries_at(&self, now: DateTime<Utc>) -> Vec<HistoryEntry> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        let entries: Vec<HistoryEntry> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(error = %err, "history unreadable; treating as empty");
                return Vec::new();
            }
        };

        let window = DEDUP_WINDOW.as_millis() as i64;
        let now = now.timestamp_millis();
        let mut live: Vec<HistoryEntry> = entries
            .into_iter()
            .filter(|entry| now - entry.timestamp < window)
            .collect();
        trim(&mut live);
        live
    }

    pub fn is_duplicate_at(&self, hash: &str, now: DateTime<Utc>) -> bool {
        self.entries_at(now).iter().any(|entry| entry.hash == hash)
    }

    pub fn record_at(&self, hash: &str, now: DateTime<Utc>) {
        let mut entries = self.entries_at(now);
        if entries.iter().any(|entry| entry.hash == hash) {
            return;
        }
        self.push_and_write(&mut entries, hash, now);
    }

    pub fn check_and_record_at(&self, hash: &str, now: DateTime<Utc>) -> bool {
        let mut entries = self.entries_at(now);
        if entries.iter().any(|entry| entry.hash == hash) {
            return false;
        }
        self.push_and_write(&mut entries, hash, now);
        true
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        self.write(&[])
    }

    fn push_and_write(&self, entries: &mut Vec<HistoryEntry>, hash: &str, now: DateTime<Utc>) {
        entries.push(HistoryEntry {
            hash: hash.to_string(),
            timestamp: now.timestamp_millis(),
        });
        trim(entries);
        if let Err(err) = self.write(entries) {
            tracing::warn!(error = ?err, "failed to persist play history");
        }
    }

    fn write(&self, entries: &[HistoryEntry]) -> anyhow::Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).context("create history dir")?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).context("create history temp")?;
        let json = serde_json::to_string_pretty(entries)?;
        tmp.write_all(json.as_bytes()).context("write history temp")?;
        tmp.persist(&self.path).context("replace history file")?;
        Ok(())
    }
}

// Keeps the most recent MAX_ENTRIES, dropping from the front.
fn trim(entries: &mut Vec<HistoryEntry>) {
    if entries.len() > MAX_ENTRIES {
        let excess = entries.len() - MAX_ENTRIES;
        entries.drain(..excess);
    }
}

impl DedupStore for HistoryStore {
    fn is_duplicate(&self, hash: &str) -> bool {
        self.is_duplicate_at(hash, Utc::now())
    }

    fn record(&self, hash: &str) {
        self.record_at(hash, Utc::now())
    }

    fn check_and_record(&self, hash: &str) -> bool {
        self.check_and_record_at(hash, Utc::now())
    }
}
