//! RAII guard that revokes an object URL when dropped.

use crate::blob::{BlobRegistry, ObjectUrl};

/// Revokes `url` when dropped, after the save trigger has been dispatched.
pub(super) struct RevokeGuard<'a> {
    blobs: &'a BlobRegistry,
    url: ObjectUrl,
}

impl<'a> RevokeGuard<'a> {
    pub(super) fn new(blobs: &'a BlobRegistry, url: ObjectUrl) -> Self {
        Self { blobs, url }
    }
}

impl Drop for RevokeGuard<'_> {
    fn drop(&mut self) {
        if self.blobs.revoke(&self.url) {
            tracing::debug!("revoked {}", self.url);
        }
    }
}
