//! Track HTTP response header blocks as libcurl reports them.
//!
//! With redirects followed, curl hands over one header block per hop
//! (plus any `1xx` interim blocks). Only the last, final block describes
//! the body that is actually delivered.

/// Metadata of the final response, once its header block is complete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalHead {
    pub status: u32,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

/// Header-line accumulator fed from curl's header callback.
#[derive(Debug, Default)]
pub(crate) struct HeaderTracker {
    status: Option<u32>,
    has_location: bool,
    content_type: Option<String>,
    content_length: Option<u64>,
    complete: Option<FinalHead>,
}

impl HeaderTracker {
    /// Feed one header line (trailing CRLF already trimmed).
    pub(crate) fn push_line(&mut self, line: &str) {
        if line.starts_with("HTTP/") {
            self.start_block(line);
            return;
        }
        if line.trim().is_empty() {
            self.end_block();
            return;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                self.content_type = Some(value.to_string());
            } else if name.eq_ignore_ascii_case("content-length") {
                self.content_length = value.parse::<u64>().ok();
            } else if name.eq_ignore_ascii_case("location") {
                self.has_location = !value.is_empty();
            }
        }
    }

    /// The final response head, if its header block finished arriving.
    pub(crate) fn final_head(&self) -> Option<&FinalHead> {
        self.complete.as_ref()
    }

    fn start_block(&mut self, status_line: &str) {
        self.status = status_line
            .split_whitespace()
            .nth(1)
            .and_then(|code| code.parse::<u32>().ok());
        self.has_location = false;
        self.content_type = None;
        self.content_length = None;
        self.complete = None;
    }

    fn end_block(&mut self) {
        let Some(status) = self.status else {
            return;
        };
        let interim = (100..200).contains(&status);
        let followed_redirect = (300..400).contains(&status) && self.has_location;
        if interim || followed_redirect {
            return;
        }
        self.complete = Some(FinalHead {
            status,
            content_type: self.content_type.clone(),
            content_length: self.content_length,
        });
    }
}
