use super::ExclusiveLock;
use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// A record older than this is reclaimable even if its holder is alive.
pub const LOCK_EXPIRY: Duration = Duration::from_secs(2 * 60);
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(2 * 60);
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Contents of the lock file: `"{acquired_at_ms}:{pid}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockRecord {
    pub acquired_at: DateTime<Utc>,
    pub holder_id: u32,
}

impl LockRecord {
    pub fn current() -> Self {
        Self {
            acquired_at: Utc::now(),
            holder_id: std::process::id(),
        }
    }

    pub fn parse(content: &str) -> Option<Self> {
        let (millis, pid) = content.trim().split_once(':')?;
        let millis: i64 = millis.parse().ok()?;
        let holder_id: u32 = pid.parse().ok()?;
        let acquired_at = Utc.timestamp_millis_opt(millis).single()?;
        Some(Self {
            acquired_at,
            holder_id,
        })
    }

    pub fn format(&self) -> String {
        format!("{}:{}", self.acquired_at.timestamp_millis(), self.holder_id)
    }

    /// Expired by age OR abandoned by a dead holder; either one suffices.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.acquired_at);
        let expired = age.to_std().map(|age| age >= LOCK_EXPIRY).unwrap_or(false);
        expired || !process_alive(self.holder_id)
    }
}

/// Advisory lock backed by exclusive file creation.
#[derive(Debug, Clone)]
pub struct FileLock {
    path: PathBuf,
    poll_interval: Duration,
}

impl FileLock {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("herald.lock"))
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_acquire(&self) -> io::Result<bool> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        match fs::read_to_string(&self.path) {
            Ok(content) => match LockRecord::parse(&content) {
                Some(record) if !record.is_stale(Utc::now()) => {
                    tracing::debug!(holder = record.holder_id, "lock held by active process");
                    return Ok(false);
                }
                record => {
                    tracing::debug!(?record, "reclaiming stale lock");
                    match remove_if_unchanged(&self.path, &content) {
                        Ok(true) => {}
                        Ok(false) => tracing::debug!("lock replaced before reclaim; leaving it"),
                        Err(err) => tracing::debug!(error = %err, "stale lock removal failed"),
                    }
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }

        // The record is written to a private file first and then linked into
        // place without clobbering, so the lock never exists half-written.
        let mut staged = tempfile::NamedTempFile::new_in(dir)?;
        staged.write_all(LockRecord::current().format().as_bytes())?;
        staged.flush()?;

        match staged.persist_noclobber(&self.path) {
            Ok(_) => Ok(true),
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(err) => Err(err.error),
        }
    }
}

impl ExclusiveLock for FileLock {
    fn acquire(&self) -> bool {
        match self.try_acquire() {
            Ok(acquired) => acquired,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "lock error; not acquired");
                false
            }
        }
    }

    fn release(&self) {
        let _ = fs::remove_file(&self.path);
    }

    fn wait_and_acquire(&self, timeout: Duration) -> bool {
        let start = Instant::now();
        while start.elapsed() < timeout {
            if self.acquire() {
                return true;
            }
            thread::sleep(self.poll_interval);
        }
        tracing::debug!(timeout_ms = timeout.as_millis() as u64, "timed out waiting for lock");
        false
    }
}

/// Removes `path` only while it still holds `expected`. Another reclaimer may
/// have swapped in a fresh record since `expected` was read.
pub fn remove_if_unchanged(path: &Path, expected: &str) -> io::Result<bool> {
    match fs::read_to_string(path) {
        Ok(current) if current == expected => {}
        Ok(_) => return Ok(false),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    }
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(unix)]
pub fn process_alive(pid: u32) -> bool {
    let Ok(pid) = libc::pid_t::try_from(pid) else {
        return false;
    };
    if pid <= 0 {
        return false;
    }
    // kill -0 checks for existence; EPERM means it exists under another user
    if unsafe { libc::kill(pid, 0) } == 0 {
        return true;
    }
    io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

// No cheap liveness check here; staleness falls back to expiry alone.
#[cfg(not(unix))]
pub fn process_alive(pid: u32) -> bool {
    pid != 0
}
