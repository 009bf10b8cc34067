//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use carsnap_config::ConfigError;
use carsnap_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const REMOTE: i32 = 4;
    pub const NOT_FOUND: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Page URL ─────────────────────────────────────────────────────
    #[error("Unsupported URL")]
    #[diagnostic(
        code(carsnap::unsupported_url),
        help(
            "Got: {url}\n\
             Open a listing on www.encar.com (…?carid=<id>) or\n\
             dealer.heydealer.com (/cars/<id>/…) and pass its address."
        )
    )]
    UnsupportedUrl { url: String },

    #[error("{message}")]
    #[diagnostic(
        code(carsnap::missing_id),
        help("Copy the address of the listing page itself, not a search or list page.")
    )]
    MissingId { message: String },

    // ── Remote ───────────────────────────────────────────────────────
    #[error("Failed to fetch data from {site}: {status_text}")]
    #[diagnostic(code(carsnap::remote_status), help("{hint}"))]
    RemoteStatus {
        site: String,
        status: u16,
        status_text: String,
        hint: String,
    },

    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(carsnap::connection_failed),
        help("Check your network connection.\nReason: {reason}")
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(carsnap::timeout),
        help("Increase the timeout with --timeout or `timeout` in the config file.")
    )]
    Timeout,

    #[error("Unexpected response: {message}")]
    #[diagnostic(
        code(carsnap::unexpected_response),
        help("The site may have changed its API. Run with -vv for details.")
    )]
    UnexpectedResponse { message: String },

    #[error("Relay request failed: {message}")]
    #[diagnostic(code(carsnap::relay))]
    Relay { message: String },

    // ── Result ───────────────────────────────────────────────────────
    #[error("No images found for download")]
    #[diagnostic(code(carsnap::no_images))]
    NoImages,

    #[error("{message}")]
    #[diagnostic(
        code(carsnap::download_failed),
        help("Check that the download directory is writable and the network is up.")
    )]
    Download { message: String },

    #[error("Another download is already in progress")]
    #[diagnostic(code(carsnap::busy))]
    Busy,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(
        code(carsnap::config_invalid),
        help("Fix the value in {path} or the matching CARSNAP_* variable.")
    )]
    ConfigInvalid {
        field: String,
        reason: String,
        path: String,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(carsnap::config), help("Config file: {path}"))]
    Config { message: String, path: String },

    // ── Internal / IO ────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(carsnap::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    #[diagnostic(code(carsnap::serialization))]
    Serialization(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnsupportedUrl { .. } | Self::MissingId { .. } => exit_code::USAGE,
            Self::RemoteStatus { status: 404, .. } | Self::NoImages => exit_code::NOT_FOUND,
            Self::RemoteStatus { .. } | Self::UnexpectedResponse { .. } | Self::Relay { .. } => {
                exit_code::REMOTE
            }
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::ConfigInvalid { .. } | Self::Config { .. } => exit_code::CONFIG,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the config file path to a `ConfigError`.
    pub fn from_config(err: ConfigError, path: &std::path::Path) -> Self {
        let path = path.display().to_string();
        match err {
            ConfigError::Validation { field, reason } => Self::ConfigInvalid {
                field,
                reason,
                path,
            },
            other => Self::Config {
                message: other.to_string(),
                path,
            },
        }
    }
}

fn remote_hint(site: &str, status: u16) -> String {
    match status {
        401 | 403 if site == "HeyDealer" => "HeyDealer needs a dealer session cookie.\n\
             Store one with: carsnap config set-cookie\n\
             or set CARSNAP_HEYDEALER_COOKIE."
            .into(),
        404 => "The listing may have been removed or sold.".into(),
        _ => format!("{site} answered with HTTP {status}. Try again later."),
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnsupportedUrl { url } => CliError::UnsupportedUrl { url },

            e @ (CoreError::MissingParameter { .. } | CoreError::IdNotInPath { .. }) => {
                CliError::MissingId {
                    message: e.to_string(),
                }
            }

            CoreError::FetchFailed {
                site,
                status,
                status_text,
            } => CliError::RemoteStatus {
                hint: remote_hint(&site, status),
                site,
                status,
                status_text,
            },

            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }

            CoreError::Timeout => CliError::Timeout,

            CoreError::Deserialization { message } => CliError::UnexpectedResponse { message },

            CoreError::NoImages => CliError::NoImages,

            e @ (CoreError::DownloadsFailed { .. } | CoreError::Download { .. }) => {
                CliError::Download {
                    message: e.to_string(),
                }
            }

            CoreError::Busy => CliError::Busy,

            CoreError::Config { message } => CliError::Config {
                message,
                path: String::new(),
            },

            CoreError::Io(e) => CliError::Io(e),

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}
