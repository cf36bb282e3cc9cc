//! URL validation.
//!
//! Only absolute `http`/`https` URLs are accepted. Everything else is
//! rejected before a request is made.

use url::Url;

use crate::error::DownloadError;

/// Parses and validates a download URL.
///
/// Leading/trailing whitespace is ignored. Empty input, unparsable input and
/// non-HTTP schemes are errors.
pub fn validate_url(raw: &str) -> Result<Url, DownloadError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DownloadError::EmptyUrl);
    }
    let url = Url::parse(trimmed).map_err(|source| DownloadError::MalformedUrl {
        url: trimmed.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(DownloadError::UnsupportedScheme(other.to_string())),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(DownloadError::MalformedUrl {
            url: trimmed.to_string(),
            source: url::ParseError::EmptyHost,
        });
    }
    Ok(url)
}

/// Serialized origin of `url` (`scheme://host[:port]`), used to scope object URLs.
pub fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        let u = validate_url("https://example.com/video.mp4").unwrap();
        assert_eq!(u.host_str(), Some("example.com"));
        assert!(validate_url("http://127.0.0.1:8080/x").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        let u = validate_url("  https://example.com/a  ").unwrap();
        assert_eq!(u.as_str(), "https://example.com/a");
    }

    #[test]
    fn empty_is_rejected() {
        assert!(matches!(validate_url(""), Err(DownloadError::EmptyUrl)));
        assert!(matches!(validate_url("   "), Err(DownloadError::EmptyUrl)));
    }

    #[test]
    fn malformed_is_rejected() {
        assert!(matches!(
            validate_url("not a url"),
            Err(DownloadError::MalformedUrl { .. })
        ));
        assert!(matches!(
            validate_url("/relative/path.mp4"),
            Err(DownloadError::MalformedUrl { .. })
        ));
    }

    #[test]
    fn other_schemes_are_rejected() {
        match validate_url("ftp://example.com/file") {
            Err(DownloadError::UnsupportedScheme(s)) => assert_eq!(s, "ftp"),
            other => panic!("expected UnsupportedScheme, got {:?}", other),
        }
        assert!(matches!(
            validate_url("file:///etc/passwd"),
            Err(DownloadError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn origin_includes_non_default_port() {
        let u = validate_url("http://127.0.0.1:8080/a/b").unwrap();
        assert_eq!(origin_of(&u), "http://127.0.0.1:8080");
        let u = validate_url("https://example.com/video.mp4").unwrap();
        assert_eq!(origin_of(&u), "https://example.com");
    }
}
