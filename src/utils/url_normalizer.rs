//! Thumbnail URL validation and normalization.
//!
//! Course thumbnails are stored as absolute HTTP(S) URLs in a canonical form
//! so that the same image is not stored under several spellings.

use url::Url;

/// Longest thumbnail URL accepted, after normalization.
pub const MAX_THUMBNAIL_URL_LEN: usize = 2048;

/// Errors that can occur while normalizing a thumbnail URL.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlNormalizationError {
    #[error("Enter a valid URL.")]
    InvalidFormat,

    #[error("Only HTTP and HTTPS thumbnail URLs are allowed.")]
    UnsupportedProtocol,

    #[error("Ensure this URL has at most {MAX_THUMBNAIL_URL_LEN} characters.")]
    TooLong,
}

/// Normalizes a thumbnail URL.
///
/// Surrounding whitespace is trimmed, the host is lowercased, default ports
/// and fragments are dropped. Path and query are kept as-is.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed or relative URLs.
/// Returns [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
/// Returns [`UrlNormalizationError::TooLong`] if the result exceeds [`MAX_THUMBNAIL_URL_LEN`].
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_url(" HTTPS://CDN.Example.com:443/img/rust.png#top ").unwrap(),
///     "https://cdn.example.com/img/rust.png"
/// );
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url = Url::parse(input.trim()).map_err(|_| UrlNormalizationError::InvalidFormat)?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    }

    // The url crate already lowercases domain hosts for special schemes and
    // strips their default ports; only the fragment needs explicit removal.
    if url.host_str().is_none() {
        return Err(UrlNormalizationError::InvalidFormat);
    }
    url.set_fragment(None);

    let normalized = url.to_string();
    if normalized.len() > MAX_THUMBNAIL_URL_LEN {
        return Err(UrlNormalizationError::TooLong);
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_path_and_query() {
        assert_eq!(
            normalize_url("https://cdn.example.com/img/Rust.png?v=2").unwrap(),
            "https://cdn.example.com/img/Rust.png?v=2"
        );
    }

    #[test]
    fn test_normalize_lowercases_host() {
        assert_eq!(
            normalize_url("https://CDN.Example.COM/a.png").unwrap(),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_normalize_drops_default_port_and_fragment() {
        assert_eq!(
            normalize_url("https://cdn.example.com:443/a.png#preview").unwrap(),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_normalize_keeps_custom_port() {
        assert_eq!(
            normalize_url("http://localhost:8080/a.png").unwrap(),
            "http://localhost:8080/a.png"
        );
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(
            normalize_url("  https://cdn.example.com/a.png \n").unwrap(),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_relative_url_rejected() {
        assert_eq!(
            normalize_url("/media/a.png"),
            Err(UrlNormalizationError::InvalidFormat)
        );
    }

    #[test]
    fn test_unsupported_protocols_rejected() {
        for input in [
            "javascript:alert(1)",
            "data:image/png;base64,AAAA",
            "ftp://files.example.com/a.png",
            "file:///etc/passwd",
        ] {
            assert_eq!(
                normalize_url(input),
                Err(UrlNormalizationError::UnsupportedProtocol),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_too_long_rejected() {
        let long = format!("https://cdn.example.com/{}", "a".repeat(MAX_THUMBNAIL_URL_LEN));
        assert_eq!(normalize_url(&long), Err(UrlNormalizationError::TooLong));
    }
}
