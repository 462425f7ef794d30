//! Resource fetching and `data:` URL handling.
//!
//! Given a resource reference, obtain its bytes. That is the whole policy:
//! no caching, no retries, no content negotiation. Callers that fetch many
//! resources at once own the fan-out.
//!
//! [RFC 2397 The "data" URL scheme](https://www.rfc-editor.org/rfc/rfc2397)

use std::fs;
use std::path::Path;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// User-Agent header sent with every HTTP request.
const USER_AGENT: &str = concat!("strata/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Media type assumed by RFC 2397 when a `data:` URL omits one.
const DEFAULT_DATA_MEDIA_TYPE: &str = "text/plain;charset=US-ASCII";

/// Errors produced while obtaining resource bytes.
#[derive(Debug, Error)]
pub enum NetError {
    /// The reference is a malformed `data:` URL.
    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// The `data:` URL payload is not valid base64.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The HTTP request failed before a response arrived, or the body could
    /// not be read.
    #[error("request for '{url}' failed: {source}")]
    Request {
        /// The requested URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} for '{url}'")]
    Status {
        /// The requested URL.
        url: String,
        /// The numeric status code.
        status: u16,
    },

    /// Reading a local file failed.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// The local path that was read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A parsed `data:` URL.
///
/// [RFC 2397 § 2](https://www.rfc-editor.org/rfc/rfc2397#section-2)
///
/// "dataurl := "data:" [ mediatype ] [ ";base64" ] "," data"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Media type including parameters, e.g. `image/png` or
    /// `text/plain;charset=utf-8`.
    pub media_type: String,
    /// Whether the payload is base64-encoded (otherwise percent-encoded).
    pub base64: bool,
    /// The raw payload after the comma, still encoded.
    pub payload: String,
}

impl DataUrl {
    /// Parse a `data:` URL.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::InvalidDataUrl`] if the scheme is missing or there
    /// is no comma separating metadata from payload.
    pub fn parse(url: &str) -> Result<Self, NetError> {
        let rest = url
            .get(..5)
            .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
            .map(|_| &url[5..])
            .ok_or_else(|| {
                NetError::InvalidDataUrl(format!(
                    "missing 'data:' scheme in '{}'",
                    abbreviate(url)
                ))
            })?;

        let (metadata, payload) = rest
            .split_once(',')
            .ok_or_else(|| {
                NetError::InvalidDataUrl(format!("missing comma in '{}'", abbreviate(url)))
            })?;

        let (media_type, base64) = match metadata.strip_suffix(";base64") {
            Some(media_type) => (media_type, true),
            None => (metadata, false),
        };

        let media_type = if media_type.is_empty() {
            DEFAULT_DATA_MEDIA_TYPE.to_string()
        } else {
            media_type.to_string()
        };

        Ok(Self {
            media_type,
            base64,
            payload: payload.to_string(),
        })
    }

    /// Decode the payload into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::Base64`] for a malformed base64 payload, or
    /// [`NetError::InvalidDataUrl`] for a malformed percent escape.
    pub fn decode(&self) -> Result<Vec<u8>, NetError> {
        if self.base64 {
            // Whitespace is legal inside base64 data URLs written by hand.
            let compact: String = self
                .payload
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            Ok(STANDARD.decode(compact)?)
        } else {
            percent_decode(&self.payload)
        }
    }

    /// Encode `bytes` as a base64 `data:` URL with the given media type.
    #[must_use]
    pub fn encode(media_type: &str, bytes: &[u8]) -> String {
        format!("data:{media_type};base64,{}", STANDARD.encode(bytes))
    }
}

/// Shorten long references (data URLs in particular) for error messages.
fn abbreviate(url: &str) -> String {
    const LIMIT: usize = 48;
    match url.char_indices().nth(LIMIT) {
        Some((cut, _)) => format!("{}…", &url[..cut]),
        None => url.to_string(),
    }
}

/// [URL Standard § 1.3 Percent-encoded bytes](https://url.spec.whatwg.org/#percent-encoded-bytes)
fn percent_decode(input: &str) -> Result<Vec<u8>, NetError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            // Exactly two hex digits; `from_str_radix` alone would also
            // take a sign.
            let hex = bytes
                .get(i + 1..i + 3)
                .filter(|digits| digits.iter().all(u8::is_ascii_hexdigit))
                .and_then(|_| u8::from_str_radix(&input[i + 1..i + 3], 16).ok())
                .ok_or_else(|| {
                    NetError::InvalidDataUrl(format!("bad percent escape at byte {i}"))
                })?;
            out.push(hex);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(out)
}

/// Fetch the bytes behind a reference.
///
/// Supported forms:
/// - `data:` URLs (decoded in place)
/// - `http://` and `https://` URLs (blocking GET)
/// - `file://` URLs and plain filesystem paths
///
/// # Errors
///
/// Returns a [`NetError`] describing the first failure.
pub fn fetch_bytes(reference: &str) -> Result<Vec<u8>, NetError> {
    let lower = reference.get(..8).unwrap_or(reference).to_ascii_lowercase();

    if lower.starts_with("data:") {
        return DataUrl::parse(reference)?.decode();
    }
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return fetch_http(reference);
    }

    let path = reference.strip_prefix("file://").unwrap_or(reference);
    fs::read(path).map_err(|source| NetError::Io {
        path: path.to_string(),
        source,
    })
}

/// Blocking HTTP GET returning the body bytes.
fn fetch_http(url: &str) -> Result<Vec<u8>, NetError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(NetError::Client)?;

    let response = client.get(url).send().map_err(|source| NetError::Request {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(NetError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .bytes()
        .map(|body| body.to_vec())
        .map_err(|source| NetError::Request {
            url: url.to_string(),
            source,
        })
}

/// [MIME Sniffing § 6.1 Matching an image type pattern](https://mimesniff.spec.whatwg.org/#matching-an-image-type-pattern)
///
/// Guess a media type from the leading bytes, falling back to the
/// reference's file extension, then to `application/octet-stream`.
#[must_use]
pub fn sniff_media_type(bytes: &[u8], reference: &str) -> &'static str {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        return "image/png";
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return "image/jpeg";
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return "image/gif";
    }
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return "image/webp";
    }

    let head: Vec<u8> = bytes
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .take(256)
        .copied()
        .collect();
    if head.starts_with(b"<svg") || (head.starts_with(b"<?xml") && contains(&head, b"<svg")) {
        return "image/svg+xml";
    }

    let path = reference.split(['?', '#']).next().unwrap_or(reference);
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
