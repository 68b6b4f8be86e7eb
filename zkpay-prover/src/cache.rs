//! Key-value caches with read-time TTL expiry.
//!
//! Two implementations back the proof generator: a process-local in-memory
//! store and a persistent directory-backed store shared across processes.
//! Expiry is checked when an entry is read; there is no background sweep.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::debug;
use zkpay_common::{CacheErrorCode, Error, Result};

/// String-keyed, string-valued store with optional TTL.
///
/// Reading an expired entry evicts it and reports absence. Implementations
/// are safe under the sequential per-key access pattern the rest of the
/// system uses; no concurrent-writer guarantees are made.
pub trait Cache: Send + Sync {
    /// Look up a key. Expired entries are evicted and reported absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value. `ttl_secs = None` means the entry never expires.
    fn set(&self, key: &str, value: String, ttl_secs: Option<u64>) -> Result<()>;

    /// Delete a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Whether a live (non-expired) entry exists for the key.
    fn has(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    value: String,
    /// Absolute expiry; `None` never expires.
    expires_at: Option<SystemTime>,
}

fn expiry_from_ttl(ttl_secs: Option<u64>) -> Option<SystemTime> {
    // A TTL too large to represent saturates to "never expires".
    ttl_secs.and_then(|secs| SystemTime::now().checked_add(Duration::from_secs(secs)))
}

fn is_expired(expires_at: Option<SystemTime>) -> bool {
    // >= so that ttl 0 is deterministically expired at the next read.
    matches!(expires_at, Some(at) if SystemTime::now() >= at)
}

/// Process-local in-memory cache.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if is_expired(entry.expires_at) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: String, ttl_secs: Option<u64>) -> Result<()> {
        self.lock().insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: expiry_from_ttl(ttl_secs),
            },
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}

/// On-disk entry layout.
#[derive(Serialize, Deserialize)]
struct PersistedEntry {
    value: String,
    /// Unix seconds; `None` never expires.
    expires_at_unix: Option<u64>,
}

/// Persistent directory-backed cache.
///
/// Entries live as JSON files under the given directory, one file per key,
/// named by the blake3 digest of the namespaced key so unrelated callers
/// sharing a directory cannot collide. Construction prepares the medium and
/// fails immediately when it cannot.
#[derive(Debug)]
pub struct FileCache {
    dir: PathBuf,
    namespace: String,
}

impl FileCache {
    pub fn new(dir: impl AsRef<Path>, namespace: impl Into<String>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            Error::cache(
                CacheErrorCode::Unavailable,
                format!("cache directory {} unavailable: {e}", dir.display()),
            )
        })?;
        Ok(Self {
            dir,
            namespace: namespace.into(),
        })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = blake3::hash(format!("{}:{key}", self.namespace).as_bytes());
        self.dir.join(format!("{}.json", digest.to_hex()))
    }
}

impl Cache for FileCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::cache(
                    CacheErrorCode::ReadFailed,
                    format!("failed to read cache entry {}: {e}", path.display()),
                ))
            }
        };
        let entry: PersistedEntry = serde_json::from_slice(&bytes).map_err(|e| {
            Error::cache(
                CacheErrorCode::ReadFailed,
                format!("corrupt cache entry {}: {e}", path.display()),
            )
        })?;
        let now_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        if matches!(entry.expires_at_unix, Some(at) if now_unix >= at) {
            debug!(key, "evicting expired cache entry");
            self.remove(key)?;
            return Ok(None);
        }
        Ok(Some(entry.value))
    }

    fn set(&self, key: &str, value: String, ttl_secs: Option<u64>) -> Result<()> {
        // A TTL too large to represent saturates to "never expires".
        let expires_at_unix = ttl_secs.and_then(|secs| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs()
                .checked_add(secs)
        });
        let entry = PersistedEntry {
            value,
            expires_at_unix,
        };
        let path = self.entry_path(key);
        let json = serde_json::to_vec(&entry).map_err(|e| {
            Error::cache(
                CacheErrorCode::WriteFailed,
                format!("failed to encode cache entry for {key}: {e}"),
            )
        })?;
        fs::write(&path, json).map_err(|e| {
            Error::cache(
                CacheErrorCode::WriteFailed,
                format!("failed to write cache entry {}: {e}", path.display()),
            )
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::cache(
                CacheErrorCode::WriteFailed,
                format!("failed to remove cache entry {}: {e}", path.display()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip_without_ttl() {
        let cache = MemoryCache::new();
        cache.set("k", "v".into(), None).unwrap();
        assert_eq!(cache.get("k").unwrap().as_deref(), Some("v"));
        assert!(cache.has("k").unwrap());
    }

    #[test]
    fn memory_expired_entry_is_evicted_at_read() {
        let cache = MemoryCache::new();
        cache.set("k", "v".into(), Some(0)).unwrap();
        assert_eq!(cache.get("k").unwrap(), None);
        assert!(!cache.has("k").unwrap());
        // The entry is gone, not just hidden.
        assert!(cache.lock().get("k").is_none());
    }

    #[test]
    fn memory_huge_ttl_never_expires() {
        let cache = MemoryCache::new();
        cache.set("k", "v".into(), Some(u64::MAX)).unwrap();
        assert_eq!(cache.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn memory_remove_is_idempotent() {
        let cache = MemoryCache::new();
        cache.set("k", "v".into(), None).unwrap();
        cache.remove("k").unwrap();
        cache.remove("k").unwrap();
        assert_eq!(cache.get("k").unwrap(), None);
    }

    #[test]
    fn file_round_trip_and_namespacing() {
        let dir = tempfile::tempdir().unwrap();
        let a = FileCache::new(dir.path(), "proofs").unwrap();
        let b = FileCache::new(dir.path(), "artifacts").unwrap();
        a.set("k", "from-a".into(), None).unwrap();
        b.set("k", "from-b".into(), None).unwrap();
        assert_eq!(a.get("k").unwrap().as_deref(), Some("from-a"));
        assert_eq!(b.get("k").unwrap().as_deref(), Some("from-b"));
    }

    #[test]
    fn file_expired_entry_is_evicted_at_read() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path(), "proofs").unwrap();
        cache.set("k", "v".into(), Some(0)).unwrap();
        assert_eq!(cache.get("k").unwrap(), None);
        assert!(!cache.has("k").unwrap());
    }

    #[test]
    fn file_huge_ttl_never_expires() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path(), "proofs").unwrap();
        cache.set("k", "v".into(), Some(u64::MAX)).unwrap();
        assert_eq!(cache.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn file_survives_reconstruction() {
        let dir = tempfile::tempdir().unwrap();
        {
            let cache = FileCache::new(dir.path(), "proofs").unwrap();
            cache.set("k", "persisted".into(), None).unwrap();
        }
        let reopened = FileCache::new(dir.path(), "proofs").unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn unavailable_medium_fails_at_construction() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("occupied");
        fs::write(&blocker, b"not a directory").unwrap();
        let err = FileCache::new(&blocker, "proofs").unwrap_err();
        assert_eq!(err.code(), "CACHE_UNAVAILABLE");
    }

    #[test]
    fn corrupt_entry_surfaces_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path(), "proofs").unwrap();
        cache.set("k", "v".into(), None).unwrap();
        fs::write(cache.entry_path("k"), b"not json").unwrap();
        let err = cache.get("k").unwrap_err();
        assert_eq!(err.code(), "CACHE_READ_FAILED");
    }
}
