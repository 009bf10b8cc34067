// ── Action controller ──
//
// One user action, end to end: classify the page URL, fetch the listing,
// download its photos, and decide what the surface should show. The
// controller performs no UI work itself; it returns the outcome together
// with the ordered side effects (`Intent`s) for the caller to apply.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::config::GrabberConfig;
use crate::download::{
    ConflictAction, DownloadEvent, DownloadReport, FsPhotoSink, PhotoSink, download_all,
};
use crate::error::CoreError;
use crate::listing::classify;
use crate::source::{Listing, ListingSource, MarketplaceSource};

/// Status-line colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Alert,
}

/// A side effect requested by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Replace the status line.
    Status { tone: Tone, text: String },
    /// Blocking notification.
    Alert(String),
    /// Put plain text on the clipboard.
    CopyToClipboard(String),
}

/// What a successful action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrabOutcome {
    pub listing: Listing,
    pub downloads: DownloadReport,
}

/// Outcome of one action plus the side effects to apply, in order.
#[derive(Debug)]
pub struct ActionReport {
    pub outcome: Result<GrabOutcome, CoreError>,
    pub intents: Vec<Intent>,
}

impl ActionReport {
    fn from_outcome(outcome: Result<GrabOutcome, CoreError>) -> Self {
        let intents = match &outcome {
            Ok(grab) => {
                let summary = grab.listing.summary.as_str();
                let mut text = format!("Images downloaded successfully!\n{summary}");
                let failed = grab.downloads.failed.len();
                if failed > 0 {
                    text.push_str(&format!(
                        "\n({failed} of {} images failed)",
                        grab.downloads.requested()
                    ));
                }
                vec![
                    Intent::Status {
                        tone: Tone::Info,
                        text,
                    },
                    Intent::CopyToClipboard(summary.to_owned()),
                ]
            }
            Err(e) => vec![
                Intent::Status {
                    tone: Tone::Alert,
                    text: if e.is_page_url_error() {
                        e.to_string()
                    } else {
                        format!("Error downloading images: {e}")
                    },
                },
                Intent::Alert(format!("Error: {e}")),
            ],
        };
        Self { outcome, intents }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Clears the in-flight flag when an action finishes, however it finishes.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs grab actions over a listing source and a photo sink.
///
/// At most one action runs per `Grabber` at a time; a concurrent call fails
/// fast with [`CoreError::Busy`].
#[derive(Debug)]
pub struct Grabber<S, P> {
    source: S,
    sink: P,
    subfolder: String,
    conflict_action: ConflictAction,
    in_flight: AtomicBool,
}

impl Grabber<MarketplaceSource, FsPhotoSink> {
    /// Wire the live marketplace clients and the filesystem sink from
    /// config. All HTTP clients share one cookie jar.
    pub fn from_config(config: &GrabberConfig) -> Result<Self, CoreError> {
        let transport = config.transport();
        let source = MarketplaceSource::new(config, &transport)?;
        let sink = FsPhotoSink::new(config.download_dir.clone(), &transport)?;
        Ok(Self::new(source, sink, config.subfolder.clone())
            .with_conflict_action(config.conflict_action))
    }
}

impl<S: ListingSource, P: PhotoSink> Grabber<S, P> {
    pub fn new(source: S, sink: P, subfolder: impl Into<String>) -> Self {
        Self {
            source,
            sink,
            subfolder: subfolder.into(),
            conflict_action: ConflictAction::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn with_conflict_action(mut self, conflict_action: ConflictAction) -> Self {
        self.conflict_action = conflict_action;
        self
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    /// Resolve and fetch a listing without downloading anything.
    pub async fn preview(&self, page_url: &str) -> Result<Listing, CoreError> {
        let reference = classify(page_url)?;
        self.source.fetch(&reference).await
    }

    /// Run one action for `page_url`.
    pub async fn run(&self, page_url: &str) -> ActionReport {
        self.run_with(page_url, |_| {}).await
    }

    /// Run one action, reporting download progress to `on_event`.
    pub async fn run_with(
        &self,
        page_url: &str,
        on_event: impl FnMut(DownloadEvent),
    ) -> ActionReport {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("action rejected, another one is in flight");
            return ActionReport::from_outcome(Err(CoreError::Busy));
        };

        ActionReport::from_outcome(self.grab(page_url, on_event).await)
    }

    async fn grab(
        &self,
        page_url: &str,
        on_event: impl FnMut(DownloadEvent),
    ) -> Result<GrabOutcome, CoreError> {
        let reference = classify(page_url)?;
        info!(site = %reference.site, id = %reference.id, "resolved listing");

        let listing = self.source.fetch(&reference).await?;
        if listing.photos.is_empty() {
            return Err(CoreError::NoImages);
        }

        let downloads = download_all(
            &self.sink,
            &self.subfolder,
            self.conflict_action,
            &listing.photos,
            on_event,
        )
        .await;

        if downloads.all_failed() {
            return Err(CoreError::DownloadsFailed {
                count: downloads.failed.len(),
            });
        }

        info!(
            saved = downloads.saved.len(),
            failed = downloads.failed.len(),
            "download pass finished"
        );
        Ok(GrabOutcome { listing, downloads })
    }
}
