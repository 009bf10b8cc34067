//! CLI configuration: thin wrapper around `carsnap_config` that applies
//! `GlobalOpts` flag overrides (--download-dir, --timeout, ...).

use std::path::PathBuf;

use carsnap_config::{Config, ConflictAction};
use carsnap_core::GrabberConfig;

use crate::cli::{GlobalOpts, OnConflict};
use crate::error::CliError;

/// The config file in effect: `--config` / `CARSNAP_CONFIG`, else the
/// platform default.
pub fn active_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(carsnap_config::config_path)
}

/// Load file + env, then apply flag overrides. Flags beat everything.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = active_path(global);
    let mut cfg = carsnap_config::load_config(Some(&path))
        .map_err(|e| CliError::from_config(e, &path))?;

    if let Some(ref dir) = global.download_dir {
        cfg.download_dir = Some(dir.clone());
    }
    if let Some(ref subfolder) = global.subfolder {
        cfg.subfolder.clone_from(subfolder);
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    if global.no_clipboard {
        cfg.clipboard = false;
    }
    Ok(cfg)
}

/// Translate the effective config into a `GrabberConfig`, resolving the
/// HeyDealer cookie.
pub fn grabber_config(
    cfg: &Config,
    global: &GlobalOpts,
    on_conflict: Option<OnConflict>,
) -> Result<GrabberConfig, CliError> {
    let mut grabber = carsnap_config::to_grabber_config(cfg)
        .map_err(|e| CliError::from_config(e, &active_path(global)))?;
    if let Some(mode) = on_conflict {
        grabber.conflict_action = match mode {
            OnConflict::Uniquify => ConflictAction::Uniquify,
            OnConflict::Overwrite => ConflictAction::Overwrite,
        };
    }
    Ok(grabber)
}
