// ── Core error types ──
//
// User-facing errors from carsnap-core. Every failure of an action ends up
// here; the CLI decides how to present it. The `From<carsnap_api::Error>`
// impl translates transport-layer errors into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Page URL errors ──────────────────────────────────────────────
    #[error("Unsupported URL")]
    UnsupportedUrl { url: String },

    #[error("{name} parameter not found in URL")]
    MissingParameter { name: &'static str },

    #[error("ID not found in URL path")]
    IdNotInPath { path: String },

    // ── Remote errors ────────────────────────────────────────────────
    #[error("Failed to fetch data from {site}: {status_text}")]
    FetchFailed {
        site: String,
        status: u16,
        status_text: String,
    },

    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Unexpected response: {message}")]
    Deserialization { message: String },

    // ── Result errors ────────────────────────────────────────────────
    #[error("No images found for download")]
    NoImages,

    #[error("All {count} downloads failed")]
    DownloadsFailed { count: usize },

    #[error("Download failed: {message}")]
    Download { message: String },

    // ── Action errors ────────────────────────────────────────────────
    #[error("Another download is already in progress")]
    Busy,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The page URL itself was rejected, before any request went out.
    pub fn is_page_url_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedUrl { .. } | Self::MissingParameter { .. } | Self::IdNotInPath { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<carsnap_api::Error> for CoreError {
    fn from(err: carsnap_api::Error) -> Self {
        match err {
            carsnap_api::Error::Api {
                site,
                status,
                status_text,
            } => CoreError::FetchFailed {
                site: site.to_owned(),
                status,
                status_text,
            },
            carsnap_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Internal(e.to_string())
                }
            }
            carsnap_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            carsnap_api::Error::ClientBuild(message) => CoreError::Config { message },
            carsnap_api::Error::Media { url, status } => CoreError::Download {
                message: format!("HTTP {status} for {url}"),
            },
            carsnap_api::Error::Deserialization { message, body: _ } => {
                CoreError::Deserialization { message }
            }
        }
    }
}
