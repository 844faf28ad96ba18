//! Remote object stores that day logs are persisted to.
//!
//! The [`ObjectStore`] trait is the seam between the log provider and the
//! durability layer. Every object carries an opaque version token; writes and
//! deletes pass the token they last read so the store can reject them when the
//! object has changed in the meantime (optimistic concurrency).
//!
//! # Module Structure
//!
//! - `github`: repository contents API over blocking HTTP
//! - [`MemoryStore`]: in-process store with the same conflict rules
//!
//! # Example
//!
//! ```
//! use daylog::remote::{MemoryStore, ObjectStore};
//!
//! let store = MemoryStore::new();
//! let version = store.put("logs/a.json", b"{}", None, "create")?;
//! let object = store.get("logs/a.json")?;
//! assert_eq!(object.version, version);
//!
//! // A stale token is rejected.
//! store.put("logs/a.json", b"{\"x\":1}", Some(&version), "update")?;
//! assert!(store.put("logs/a.json", b"{}", Some(&version), "update").is_err());
//! # Ok::<(), daylog::errors::BackendError>(())
//! ```

pub mod github;

pub use github::GitHubStore;

use crate::errors::BackendError;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Raw object content together with its current version token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content: Vec<u8>,
    pub version: String,
}

/// A keyed object store with versioned writes.
///
/// Keys are `/`-separated paths. Implementations must be safe to share across
/// threads; calls themselves are blocking.
pub trait ObjectStore: Send + Sync {
    /// Fetches an object.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` when the key does not exist.
    fn get(&self, key: &str) -> Result<StoredObject, BackendError>;

    /// Creates or replaces an object and returns its new version token.
    ///
    /// `version` must be the token last read for the key, or `None` when the
    /// caller believes the key does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Conflict` when `version` does not match the
    /// stored object, including `None` for a key that exists.
    fn put(
        &self,
        key: &str,
        content: &[u8],
        version: Option<&str>,
        message: &str,
    ) -> Result<String, BackendError>;

    /// Deletes an object whose current version is `version`.
    fn delete(&self, key: &str, version: &str, message: &str) -> Result<(), BackendError>;

    /// Probes for existence without decoding the object.
    fn exists(&self, key: &str) -> Result<bool, BackendError> {
        match self.get(key) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Lists every object key under `prefix`, recursively, sorted.
    fn list(&self, prefix: &str) -> Result<Vec<String>, BackendError>;

    /// Checks that the store is reachable with the configured credentials.
    fn ping(&self) -> Result<(), BackendError>;
}

/// Computes the version token of `content`.
pub(crate) fn content_version(content: &[u8]) -> String {
    blake3::hash(content).to_hex().to_string()
}

/// In-process object store.
///
/// Version tokens are BLAKE3 hashes of the content, so rewriting identical
/// bytes keeps the token stable, the same way a content-addressed store does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        // A poisoned map is still consistent: every mutation is a single insert or remove.
        self.objects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ObjectStore for MemoryStore {
    fn get(&self, key: &str) -> Result<StoredObject, BackendError> {
        let objects = self.lock();
        let content = objects.get(key).ok_or_else(|| BackendError::NotFound {
            key: key.to_string(),
        })?;
        Ok(StoredObject {
            version: content_version(content),
            content: content.clone(),
        })
    }

    fn put(
        &self,
        key: &str,
        content: &[u8],
        version: Option<&str>,
        message: &str,
    ) -> Result<String, BackendError> {
        let mut objects = self.lock();
        let current = objects.get(key).map(|c| content_version(c));
        if current.as_deref() != version {
            return Err(BackendError::Conflict {
                key: key.to_string(),
            });
        }

        debug!("{} ({})", message, key);
        objects.insert(key.to_string(), content.to_vec());
        Ok(content_version(content))
    }

    fn delete(&self, key: &str, version: &str, message: &str) -> Result<(), BackendError> {
        let mut objects = self.lock();
        let current = objects
            .get(key)
            .map(|c| content_version(c))
            .ok_or_else(|| BackendError::NotFound {
                key: key.to_string(),
            })?;
        if current != version {
            return Err(BackendError::Conflict {
                key: key.to_string(),
            });
        }

        debug!("{} ({})", message, key);
        objects.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, BackendError> {
        Ok(self.lock().contains_key(key))
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, BackendError> {
        let dir = format!("{}/", prefix.trim_end_matches('/'));
        Ok(self
            .lock()
            .keys()
            .filter(|k| prefix.is_empty() || k.starts_with(&dir))
            .cloned()
            .collect())
    }

    fn ping(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
