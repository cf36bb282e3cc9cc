//! Download error type and its coarse classification.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a single download before or during the save.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("no URL given")]
    EmptyUrl,

    #[error("malformed URL {url:?}: {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),

    /// The request never produced a final response (DNS, refused, TLS, timeout).
    #[error("network error: {0}")]
    Transport(#[source] curl::Error),

    #[error("HTTP error! Status: {0}")]
    HttpStatus(u32),

    /// Headers arrived but the body could not be read in full.
    #[error("failed to read response body: {0}")]
    BodyRead(String),

    #[error("object URL {0} is not live")]
    DeadObjectUrl(String),

    #[error("file already exists: {}", .0.display())]
    FileExists(PathBuf),

    #[error("failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Coarse failure class, used for logging and exit-status decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any request was made.
    Input,
    /// Unreachable host, DNS, connection or TLS failure.
    Network,
    /// Final response had a non-2xx status.
    Status,
    /// Response body could not be materialized.
    Body,
    /// The save host refused or failed to write the file.
    Host,
}

impl DownloadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DownloadError::EmptyUrl
            | DownloadError::MalformedUrl { .. }
            | DownloadError::UnsupportedScheme(_) => ErrorKind::Input,
            DownloadError::Transport(_) => ErrorKind::Network,
            DownloadError::HttpStatus(_) => ErrorKind::Status,
            DownloadError::BodyRead(_) => ErrorKind::Body,
            DownloadError::DeadObjectUrl(_)
            | DownloadError::FileExists(_)
            | DownloadError::Save { .. } => ErrorKind::Host,
        }
    }

    /// HTTP status for `HttpStatus` errors.
    pub fn status(&self) -> Option<u32> {
        match self {
            DownloadError::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }
}
