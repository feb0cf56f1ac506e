//! Script source fetching for the inlay renderer.
//!
//! Provides the async GET wrapper used by the default platform to load
//! `<script src="...">` bodies, plus decoding of `data:` URLs so inline
//! payloads never touch the network.
use base64::Engine;
use percent_encoding::percent_decode_str;
use std::time::Duration;

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Connection timeout. The body itself is not time-limited: a slow script
/// stalls its phase exactly like it would on a parsed page.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors produced while fetching a script body.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The `data:` URL had no `,` separating metadata from payload.
    #[error("invalid data URL: missing comma")]
    MissingComma,
    /// The base64 payload of a `data:` URL did not decode.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded payload was not UTF-8.
    #[error("script body is not valid UTF-8")]
    InvalidUtf8,
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),
    /// The URL has a scheme this loader does not handle.
    #[error("unsupported URL scheme in '{0}'")]
    UnsupportedScheme(String),
    /// The loader has no resource for this URL (offline or stubbed loaders).
    #[error("resource unavailable: {0}")]
    Unavailable(String),
}

/// A parsed `data:` URL that can be decoded into raw bytes.
pub struct DataURL {
    /// The full raw `data:` URL string (e.g. `data:text/javascript;base64,...`).
    pub raw_data: String,
}

impl DataURL {
    /// Create a new `DataURL` from a raw data URL string.
    #[must_use]
    pub const fn new(raw_data: String) -> Self {
        Self { raw_data }
    }

    /// Decode the data URL payload into raw bytes.
    ///
    /// Base64 payloads are decoded; anything else is taken as percent-encoded
    /// text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingComma`] for a malformed URL and
    /// [`FetchError::Base64`] when a base64 payload does not decode.
    pub fn decode(&self) -> Result<Vec<u8>, FetchError> {
        let data_url = self.raw_data.trim_start_matches("data:");
        let (metadata, data) = data_url.split_once(',').ok_or(FetchError::MissingComma)?;

        if metadata.ends_with(";base64") {
            Ok(base64::engine::general_purpose::STANDARD.decode(data)?)
        } else {
            Ok(percent_decode_str(data).collect())
        }
    }
}

/// Fetch a script URL and return its body as text.
///
/// `data:` URLs are decoded in-process; `http(s)` URLs go through reqwest.
///
/// # Errors
///
/// Returns a [`FetchError`] if the URL scheme is unsupported, the request
/// fails, the response has a non-success status, or the body cannot be
/// decoded as UTF-8.
pub async fn fetch_text(url: &str) -> Result<String, FetchError> {
    if url.starts_with("data:") {
        let bytes = DataURL::new(url.to_string()).decode()?;
        return String::from_utf8(bytes).map_err(|_| FetchError::InvalidUtf8);
    }

    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(FetchError::UnsupportedScheme(url.to_string()));
    }

    let client = reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()?;

    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    Ok(response.text().await?)
}
