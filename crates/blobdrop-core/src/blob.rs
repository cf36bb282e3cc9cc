//! In-memory blobs and the short-lived object URLs that address them.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Fully materialized response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    bytes: Vec<u8>,
    content_type: Option<String>,
}

impl Blob {
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `Content-Type` the server declared, if any. Informational only.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

/// Handle of the form `blob:<origin>/<n>`, valid until revoked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Table of live object URLs.
///
/// Shared by reference between the downloader (which creates and revokes
/// handles) and the save host (which resolves them).
#[derive(Debug, Default)]
pub struct BlobRegistry {
    next_id: AtomicU64,
    live: Mutex<HashMap<ObjectUrl, Arc<Blob>>>,
}

impl BlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `blob` and returns a fresh handle scoped to `origin`.
    pub fn create_object_url(&self, blob: Blob, origin: &str) -> ObjectUrl {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let url = ObjectUrl(format!("blob:{}/{}", origin, id));
        self.table().insert(url.clone(), Arc::new(blob));
        url
    }

    /// Returns the blob behind `url`, or `None` once it has been revoked.
    pub fn resolve(&self, url: &ObjectUrl) -> Option<Arc<Blob>> {
        self.table().get(url).cloned()
    }

    /// Invalidates `url`. Returns false if it was not live.
    ///
    /// Readers that already resolved the handle keep their `Arc` until they drop it.
    pub fn revoke(&self, url: &ObjectUrl) -> bool {
        self.table().remove(url).is_some()
    }

    /// Number of handles that have been created and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.table().len()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<ObjectUrl, Arc<Blob>>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.live.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
