use thiserror::Error;

/// Top-level error type for the `carsnap-api` crate.
///
/// Covers every failure mode across the listing APIs, the media CDN
/// and the credentialed relay. `carsnap-core` maps these into user-facing
/// diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Listing APIs ────────────────────────────────────────────────
    /// Non-success status from a marketplace API.
    ///
    /// `status_text` is the canonical reason phrase (empty when the status
    /// code has none).
    #[error("Failed to fetch data from {site}: {status_text}")]
    Api {
        site: &'static str,
        status: u16,
        status_text: String,
    },

    // ── Media ───────────────────────────────────────────────────────
    /// Non-success status while fetching a photo.
    #[error("Image request to {url} failed (HTTP {status})")]
    Media { url: String, status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Media { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
