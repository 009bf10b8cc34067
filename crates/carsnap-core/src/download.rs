// ── Photo downloads ──
//
// The download loop is sequential: one request per photo, each awaited
// before the next starts, in listing order. Every request yields a result;
// failures are collected into the `DownloadReport` rather than dropped.

use std::ffi::OsStr;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use carsnap_api::{MediaClient, TransportConfig};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::photo::PhotoEntry;

/// Upper bound on `name (n).ext` candidates tried before giving up.
const MAX_UNIQUIFY_ATTEMPTS: u32 = 10_000;

/// What to do when the target file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictAction {
    /// Save under `name (1).ext`, `name (2).ext`, ...
    #[default]
    Uniquify,
    /// Replace the existing file.
    Overwrite,
}

/// One download, as handed to a [`PhotoSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub url: String,
    /// Path relative to the sink's root: `<subfolder>/<filename>`.
    pub filename: String,
    pub conflict_action: ConflictAction,
    /// Ask the user for a location. Always `false` here; kept so requests
    /// match the platform shape.
    pub save_as: bool,
}

impl DownloadRequest {
    pub fn for_photo(photo: &PhotoEntry, subfolder: &str, conflict_action: ConflictAction) -> Self {
        let subfolder = subfolder.trim_matches('/');
        let filename = if subfolder.is_empty() {
            photo.filename.clone()
        } else {
            format!("{subfolder}/{}", photo.filename)
        };
        Self {
            url: photo.image_url.clone(),
            filename,
            conflict_action,
            save_as: false,
        }
    }
}

/// Something that can save a photo and say where it went.
pub trait PhotoSink {
    fn download(
        &self,
        request: &DownloadRequest,
    ) -> impl Future<Output = Result<PathBuf, CoreError>> + Send;
}

/// Progress notifications from the download loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent {
    Started { total: usize },
    Saved { index: usize, path: PathBuf },
    Failed { index: usize, filename: String, message: String },
}

/// A photo that could not be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDownload {
    pub photo: PhotoEntry,
    pub message: String,
}

/// Result of one download pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DownloadReport {
    pub saved: Vec<PathBuf>,
    pub failed: Vec<FailedDownload>,
}

impl DownloadReport {
    pub fn requested(&self) -> usize {
        self.saved.len() + self.failed.len()
    }

    /// `true` when at least one photo was requested and none was saved.
    pub fn all_failed(&self) -> bool {
        self.saved.is_empty() && !self.failed.is_empty()
    }
}

/// Download every photo in order, one at a time.
pub async fn download_all<S: PhotoSink>(
    sink: &S,
    subfolder: &str,
    conflict_action: ConflictAction,
    photos: &[PhotoEntry],
    mut on_event: impl FnMut(DownloadEvent),
) -> DownloadReport {
    let mut report = DownloadReport::default();
    on_event(DownloadEvent::Started {
        total: photos.len(),
    });

    for (index, photo) in photos.iter().enumerate() {
        let request = DownloadRequest::for_photo(photo, subfolder, conflict_action);
        match sink.download(&request).await {
            Ok(path) => {
                info!(path = %path.display(), "saved photo");
                on_event(DownloadEvent::Saved {
                    index,
                    path: path.clone(),
                });
                report.saved.push(path);
            }
            Err(e) => {
                warn!(url = %photo.image_url, error = %e, "photo download failed");
                on_event(DownloadEvent::Failed {
                    index,
                    filename: photo.filename.clone(),
                    message: e.to_string(),
                });
                report.failed.push(FailedDownload {
                    photo: photo.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    report
}

// ── Filesystem sink ──────────────────────────────────────────────────

/// Saves photos under a root directory, fetching them with [`MediaClient`].
#[derive(Debug, Clone)]
pub struct FsPhotoSink {
    media: MediaClient,
    root: PathBuf,
}

impl FsPhotoSink {
    pub fn new(root: PathBuf, transport: &TransportConfig) -> Result<Self, CoreError> {
        Ok(Self {
            media: MediaClient::new(transport)?,
            root,
        })
    }
}

impl PhotoSink for FsPhotoSink {
    async fn download(&self, request: &DownloadRequest) -> Result<PathBuf, CoreError> {
        let relative = Path::new(&request.filename);
        let name = relative
            .file_name()
            .and_then(OsStr::to_str)
            .ok_or_else(|| CoreError::Download {
                message: format!("invalid target filename: {}", request.filename),
            })?;
        let dir = match relative.parent() {
            Some(parent) => self.root.join(parent),
            None => self.root.clone(),
        };

        let bytes = self.media.get_bytes(&request.url).await?;

        tokio::fs::create_dir_all(&dir).await?;
        match request.conflict_action {
            ConflictAction::Uniquify => write_unique(&dir, name, &bytes).await,
            ConflictAction::Overwrite => {
                let path = dir.join(name);
                tokio::fs::write(&path, &bytes).await?;
                Ok(path)
            }
        }
    }
}

/// `a.jpg` → `a (n).jpg`; `n == 0` returns the name unchanged.
pub fn uniquified_name(name: &str, n: u32) -> String {
    if n == 0 {
        return name.to_owned();
    }
    let path = Path::new(name);
    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or(name);
    match path.extension().and_then(OsStr::to_str) {
        Some(ext) => format!("{stem} ({n}).{ext}"),
        None => format!("{stem} ({n})"),
    }
}

/// Create `dir/name` without clobbering anything, bumping the counter on
/// each collision. `create_new` makes the check and the create atomic.
async fn write_unique(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, CoreError> {
    for n in 0..MAX_UNIQUIFY_ATTEMPTS {
        let path = dir.join(uniquified_name(name, n));
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => {
                fill_or_discard(file, &path, bytes).await?;
                if n > 0 {
                    debug!(original = name, saved = %path.display(), "renamed on conflict");
                }
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e.into()),
        }
    }
    Err(CoreError::Download {
        message: format!("no free filename for {name} in {}", dir.display()),
    })
}

/// Write `bytes` to a freshly created file. On failure the partial file is
/// removed so later runs do not number around it.
async fn fill_or_discard<W: AsyncWrite + Unpin>(
    mut file: W,
    path: &Path,
    bytes: &[u8],
) -> Result<(), CoreError> {
    let written = async {
        file.write_all(bytes).await?;
        file.flush().await
    }
    .await;
    if let Err(e) = written {
        drop(file);
        if let Err(cleanup) = tokio::fs::remove_file(path).await {
            warn!(path = %path.display(), error = %cleanup, "could not remove partial file");
        }
        return Err(e.into());
    }
    Ok(())
}
