//! Host save facility.
//!
//! The downloader never touches the filesystem itself. It builds a
//! `SaveTrigger` pointing at a live object URL and hands it to a `SaveHost`,
//! which resolves the handle and stores the bytes under the trigger's name.

mod directory;
mod naming;

pub use directory::DirectorySaveHost;
pub use naming::{next_free_path, numbered_name};

use std::path::PathBuf;

use crate::blob::{BlobRegistry, ObjectUrl};
use crate::error::DownloadError;

/// Transient element that asks the host to save `href` as `download`.
/// Dropping it removes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTrigger {
    pub href: ObjectUrl,
    pub download: String,
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub path: PathBuf,
    pub bytes: u64,
    pub content_type: Option<String>,
}

/// Facility that turns an activated trigger into a saved file.
pub trait SaveHost {
    /// Activates `trigger`. `href` must still be live in `blobs`.
    fn offer(&self, trigger: &SaveTrigger, blobs: &BlobRegistry)
        -> Result<SavedFile, DownloadError>;
}
