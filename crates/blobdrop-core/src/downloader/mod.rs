//! Fetch one resource and hand it to the save host.
//!
//! Strictly sequential: validate, GET, check status, materialize the body,
//! mint an object URL, dispatch one save trigger, revoke the object URL.

mod revoke;

use crate::blob::BlobRegistry;
use crate::error::DownloadError;
use crate::fetch::Fetch;
use crate::save::{SaveHost, SaveTrigger, SavedFile};
use crate::url_model;
use revoke::RevokeGuard;

/// Name every saved file is offered under.
pub const SAVE_FILENAME: &str = "video.mp4";

/// Message logged once per successful run.
pub const SUCCESS_MESSAGE: &str = "Download initiated.";

pub struct Downloader<F, H> {
    fetcher: F,
    host: H,
    blobs: BlobRegistry,
}

impl<F: Fetch, H: SaveHost> Downloader<F, H> {
    pub fn new(fetcher: F, host: H) -> Self {
        Self {
            fetcher,
            host,
            blobs: BlobRegistry::new(),
        }
    }

    /// Object URLs minted by this downloader. Empty between runs.
    pub fn blobs(&self) -> &BlobRegistry {
        &self.blobs
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Downloads `url` and offers it to the host as `video.mp4`.
    ///
    /// Invalid URLs fail before any request. A non-2xx status or a broken
    /// body fails before an object URL exists, so nothing is dispatched.
    /// Once minted, the object URL is revoked whether or not the host
    /// accepted the trigger.
    pub fn download_file(&self, url: &str) -> Result<SavedFile, DownloadError> {
        let url = url_model::validate_url(url)?;

        tracing::debug!("GET {}", url);
        let response = self.fetcher.fetch(&url)?;
        if !response.ok() {
            return Err(DownloadError::HttpStatus(response.status()));
        }
        let blob = response.into_blob()?;
        tracing::debug!(bytes = blob.len(), "body materialized");

        let href = self
            .blobs
            .create_object_url(blob, &url_model::origin_of(&url));
        let _revoke = RevokeGuard::new(&self.blobs, href.clone());

        let trigger = SaveTrigger {
            href,
            download: SAVE_FILENAME.to_string(),
        };
        self.host.offer(&trigger, &self.blobs)
    }

    /// Runs `download_file` and writes the outcome line, then hands the result back.
    pub fn download_and_log(&self, url: &str) -> Result<SavedFile, DownloadError> {
        let result = self.download_file(url);
        log_outcome(&result);
        result
    }

    /// Like `download_and_log`, but the error is only logged.
    pub fn run(&self, url: &str) -> Option<SavedFile> {
        self.download_and_log(url).ok()
    }
}

/// Writes the single outcome line for a run: INFO on success, ERROR on failure.
fn log_outcome(result: &Result<SavedFile, DownloadError>) {
    match result {
        Ok(saved) => tracing::info!(
            path = %saved.path.display(),
            bytes = saved.bytes,
            "{}",
            SUCCESS_MESSAGE
        ),
        Err(e) => match e.status() {
            Some(status) => tracing::error!(status, "Download failed: {}", e),
            None => tracing::error!(kind = ?e.kind(), "Download failed: {}", e),
        },
    }
}
