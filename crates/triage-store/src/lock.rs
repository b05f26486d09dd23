//! Exclusive lock around case log writes.
//!
//! The lock is a sibling file (`cases.jsonl.lock`) created with `create_new`.
//! Writers hold it for one append-and-retrain step only, so readers and idle
//! sessions never block anyone. A lock file older than
//! [`LockOptions::stale_after`] belongs to a writer that died mid-step and is
//! broken.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::StoreError;

/// Timing for [`acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOptions {
    /// Give up after waiting this long for another writer.
    pub wait: Duration,
    /// Pause between attempts.
    pub retry: Duration,
    /// A lock file untouched for this long is treated as abandoned.
    pub stale_after: Duration,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            wait: Duration::from_secs(30),
            retry: Duration::from_millis(50),
            stale_after: Duration::from_secs(300),
        }
    }
}

/// Held lock. The lock file is removed on drop.
#[derive(Debug)]
pub struct CaseLogLock {
    path: PathBuf,
}

impl CaseLogLock {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CaseLogLock {
    fn drop(&mut self) {
        if let Err(error) = std::fs::remove_file(&self.path)
            && error.kind() != ErrorKind::NotFound
        {
            tracing::warn!(path = %self.path.display(), %error, "failed to release case log lock");
        }
    }
}

/// Block until the lock at `path` is free, then take it.
///
/// # Errors
///
/// Returns `StoreError::Locked` when another writer keeps the lock past
/// `options.wait`, and `StoreError::Io` when the lock file cannot be created
/// or a stale one cannot be removed.
pub fn acquire(path: &Path, options: &LockOptions) -> Result<CaseLogLock, StoreError> {
    let started = Instant::now();

    loop {
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(mut file) => {
                let _ = writeln!(file, "{}", std::process::id());
                tracing::debug!(path = %path.display(), "locked case log");
                return Ok(CaseLogLock {
                    path: path.to_path_buf(),
                });
            }
            Err(error) if error.kind() == ErrorKind::AlreadyExists => {
                if age(path).is_some_and(|age| age >= options.stale_after) {
                    tracing::warn!(path = %path.display(), "breaking abandoned case log lock");
                    match std::fs::remove_file(path) {
                        Ok(()) => continue,
                        Err(error) if error.kind() == ErrorKind::NotFound => continue,
                        Err(error) => return Err(StoreError::io(path, error)),
                    }
                }
                if started.elapsed() >= options.wait {
                    return Err(StoreError::Locked {
                        path: path.to_path_buf(),
                    });
                }
                std::thread::sleep(options.retry);
            }
            Err(error) => return Err(StoreError::io(path, error)),
        }
    }
}

/// Time since the lock file was last written, if it can be read.
fn age(path: &Path) -> Option<Duration> {
    std::fs::metadata(path).ok()?.modified().ok()?.elapsed().ok()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn quick(stale_after: Duration) -> LockOptions {
        LockOptions {
            wait: Duration::from_millis(120),
            retry: Duration::from_millis(10),
            stale_after,
        }
    }

    #[test]
    fn lock_file_lives_only_while_held() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cases.jsonl.lock");

        let lock = acquire(&path, &LockOptions::default()).unwrap();
        assert!(path.is_file());
        assert_eq!(lock.path(), path);
        drop(lock);
        assert!(!path.exists());
    }

    #[test]
    fn second_writer_times_out() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cases.jsonl.lock");
        let _held = acquire(&path, &LockOptions::default()).unwrap();

        let err = acquire(&path, &quick(Duration::from_secs(300))).unwrap_err();
        assert!(matches!(err, StoreError::Locked { .. }), "{err}");
    }

    #[test]
    fn abandoned_lock_is_broken() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cases.jsonl.lock");
        std::fs::write(&path, "999999\n").unwrap();
        std::thread::sleep(Duration::from_millis(20));

        let lock = acquire(&path, &quick(Duration::from_millis(10))).unwrap();
        assert!(path.is_file());
        drop(lock);
    }

    #[test]
    fn released_lock_can_be_retaken() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cases.jsonl.lock");

        drop(acquire(&path, &LockOptions::default()).unwrap());
        assert!(acquire(&path, &quick(Duration::from_secs(300))).is_ok());
    }
}
