//! Single HTTP GET with the body buffered in memory.
//!
//! Uses the curl crate (libcurl). Redirects are followed. The response is
//! split in two steps: `fetch` returns once the transfer ends with the final
//! status, and `Response::into_blob` surfaces whether the body arrived intact.

mod headers;

use headers::FinalHead;

use std::str;
use std::time::Duration;
use url::Url;

use crate::blob::Blob;
use crate::error::DownloadError;
use headers::HeaderTracker;

const MAX_REDIRECTIONS: u32 = 10;

/// Network capability used by the downloader.
pub trait Fetch {
    /// Performs a GET for `url`. Errors only when no final response was received.
    fn fetch(&self, url: &Url) -> Result<Response, DownloadError>;
}

/// Final response: status and headers, plus the deferred body outcome.
#[derive(Debug)]
pub struct Response {
    head: FinalHead,
    body: Result<Vec<u8>, String>,
}

impl Response {
    /// Response whose body arrived in full.
    pub fn new(status: u32, body: Vec<u8>) -> Self {
        Self {
            head: FinalHead {
                status,
                content_type: None,
                content_length: Some(body.len() as u64),
            },
            body: Ok(body),
        }
    }

    /// Response whose headers arrived but whose body failed with `reason`.
    pub fn body_failed(status: u32, reason: impl Into<String>) -> Self {
        Self {
            head: FinalHead {
                status,
                content_type: None,
                content_length: None,
            },
            body: Err(reason.into()),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.head.content_type = Some(content_type.into());
        self
    }

    pub fn status(&self) -> u32 {
        self.head.status
    }

    /// True for 2xx.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.head.status)
    }

    /// Materializes the body as a blob.
    pub fn into_blob(self) -> Result<Blob, DownloadError> {
        let bytes = self.body.map_err(DownloadError::BodyRead)?;
        Ok(Blob::new(bytes, self.head.content_type))
    }
}

/// Transfer options read from config.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// None = libcurl default connect timeout.
    pub connect_timeout: Option<Duration>,
    /// None = no overall limit; an unresponsive server blocks indefinitely.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

/// libcurl-backed fetcher. Blocks the calling thread.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    options: FetchOptions,
}

impl CurlFetcher {
    pub fn new(options: FetchOptions) -> Self {
        Self { options }
    }

    fn configure(&self, easy: &mut curl::easy::Easy, url: &Url) -> Result<(), curl::Error> {
        easy.url(url.as_str())?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTIONS)?;
        if let Some(t) = self.options.connect_timeout {
            easy.connect_timeout(t)?;
        }
        if let Some(t) = self.options.timeout {
            easy.timeout(t)?;
        }
        let agent = self
            .options
            .user_agent
            .clone()
            .unwrap_or_else(default_user_agent);
        easy.useragent(&agent)?;
        Ok(())
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&self, url: &Url) -> Result<Response, DownloadError> {
        let mut easy = curl::easy::Easy::new();
        self.configure(&mut easy, url)
            .map_err(DownloadError::Transport)?;

        let mut tracker = HeaderTracker::default();
        let mut body: Vec<u8> = Vec::new();
        let outcome = {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(s) = str::from_utf8(data) {
                        tracker.push_line(s.trim_end());
                    }
                    true
                })
                .map_err(DownloadError::Transport)?;
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(DownloadError::Transport)?;
            transfer.perform()
        };

        let head = match (outcome, tracker.final_head()) {
            (Ok(()), Some(head)) => head.clone(),
            (Ok(()), None) => {
                // Non-HTTP framing or a server that sent no header block at all.
                let status = easy.response_code().map_err(DownloadError::Transport)?;
                FinalHead {
                    status,
                    ..FinalHead::default()
                }
            }
            (Err(e), Some(head)) => {
                tracing::debug!(status = head.status, "body transfer failed: {}", e);
                return Ok(Response {
                    head: head.clone(),
                    body: Err(e.to_string()),
                });
            }
            (Err(e), None) => return Err(DownloadError::Transport(e)),
        };

        if let Some(expected) = head.content_length {
            let received = body.len() as u64;
            if received != expected {
                return Ok(Response {
                    head,
                    body: Err(format!(
                        "partial transfer: expected {} bytes, got {}",
                        expected, received
                    )),
                });
            }
        }

        tracing::debug!(status = head.status, bytes = body.len(), "GET {} finished", url);
        Ok(Response {
            head,
            body: Ok(body),
        })
    }
}

fn default_user_agent() -> String {
    format!("blobdrop/{}", env!("CARGO_PKG_VERSION"))
}
