//! Cross-process coordination for hook invocations.
//!
//! Every hook is a fresh process, so the only shared state is two files in
//! the herald directory: an exclusive lock and a recent-play history. The
//! history is only ever touched while the lock is held.

pub mod history;
pub mod lock;

use std::time::Duration;

pub use history::HistoryStore;
pub use lock::FileLock;

pub trait ExclusiveLock {
    /// One attempt. `false` covers both "held by someone else" and any error.
    fn acquire(&self) -> bool;
    /// Idempotent; errors are swallowed.
    fn release(&self);
    fn wait_and_acquire(&self, timeout: Duration) -> bool;
}

/// Recently announced content. Callers must hold the [`ExclusiveLock`].
pub trait DedupStore {
    fn is_duplicate(&self, hash: &str) -> bool;
    fn record(&self, hash: &str);
    /// `true` when the hash is new (and is now recorded), `false` for a repeat.
    fn check_and_record(&self, hash: &str) -> bool;
}

/// Releases the lock when dropped, including during unwinding.
pub struct LockGuard<'a> {
    lock: &'a dyn ExclusiveLock,
}

impl<'a> LockGuard<'a> {
    pub fn wait(lock: &'a dyn ExclusiveLock, timeout: Duration) -> Option<Self> {
        lock.wait_and_acquire(timeout).then_some(Self { lock })
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

/// Fixed-length digest of announced text.
pub fn hash_content(text: &str) -> String {
    let digest = blake3::hash(text.as_bytes()).to_hex();
    digest[..16].to_string()
}
