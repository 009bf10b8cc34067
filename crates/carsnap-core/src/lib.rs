// carsnap-core: Listing resolution, summary formatting and photo downloads for carsnap

pub mod action;
pub mod config;
pub mod download;
pub mod error;
pub mod format;
pub mod fuel;
pub mod listing;
pub mod photo;
pub mod source;
pub mod summary;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::{ActionReport, GrabOutcome, Grabber, Intent, Tone};
pub use config::GrabberConfig;
pub use download::{
    ConflictAction, DownloadEvent, DownloadReport, DownloadRequest, FsPhotoSink, PhotoSink,
};
pub use error::CoreError;
pub use listing::{ListingReference, Site, classify};
pub use photo::PhotoEntry;
pub use source::{Listing, ListingSource, MarketplaceSource};
pub use summary::ListingSummary;
