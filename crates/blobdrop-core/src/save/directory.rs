//! Save host that writes into a download directory.

use std::path::PathBuf;

use super::{next_free_path, SaveHost, SaveTrigger, SavedFile};
use crate::blob::BlobRegistry;
use crate::config::ConflictPolicy;
use crate::error::DownloadError;
use crate::storage;

#[derive(Debug, Clone)]
pub struct DirectorySaveHost {
    dir: PathBuf,
    conflict: ConflictPolicy,
}

impl DirectorySaveHost {
    pub fn new(dir: impl Into<PathBuf>, conflict: ConflictPolicy) -> Self {
        Self {
            dir: dir.into(),
            conflict,
        }
    }

    fn target_path(&self, filename: &str) -> Result<PathBuf, DownloadError> {
        let direct = self.dir.join(filename);
        match self.conflict {
            ConflictPolicy::Overwrite => Ok(direct),
            ConflictPolicy::Fail if direct.exists() => Err(DownloadError::FileExists(direct)),
            ConflictPolicy::Fail => Ok(direct),
            ConflictPolicy::Rename => {
                next_free_path(&self.dir, filename).ok_or(DownloadError::FileExists(direct))
            }
        }
    }
}

impl SaveHost for DirectorySaveHost {
    fn offer(
        &self,
        trigger: &SaveTrigger,
        blobs: &BlobRegistry,
    ) -> Result<SavedFile, DownloadError> {
        let blob = blobs
            .resolve(&trigger.href)
            .ok_or_else(|| DownloadError::DeadObjectUrl(trigger.href.to_string()))?;

        std::fs::create_dir_all(&self.dir).map_err(|source| DownloadError::Save {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.target_path(&trigger.download)?;

        storage::write_atomically(&path, blob.as_bytes()).map_err(|source| {
            DownloadError::Save {
                path: path.clone(),
                source,
            }
        })?;
        tracing::debug!(bytes = blob.len(), "saved {} as {}", trigger.href, path.display());

        Ok(SavedFile {
            path,
            bytes: blob.len() as u64,
            content_type: blob.content_type().map(str::to_string),
        })
    }
}
