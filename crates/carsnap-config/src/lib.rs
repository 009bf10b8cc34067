//! Configuration for carsnap.
//!
//! A TOML file layered under `CARSNAP_*` environment variables, HeyDealer
//! cookie resolution (env + keyring + plaintext), and translation to
//! `carsnap_core::GrabberConfig`. The CLI applies its flag overrides on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::{ProjectDirs, UserDirs};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use carsnap_core::config::{
    DEFAULT_ENCAR_API, DEFAULT_ENCAR_CDN, DEFAULT_HEYDEALER_API, DEFAULT_HEYDEALER_ORIGIN,
    DEFAULT_SUBFOLDER,
};
use carsnap_core::GrabberConfig;

pub use carsnap_core::ConflictAction;

/// Keyring service name.
pub const KEYRING_SERVICE: &str = "carsnap";

/// Keyring entry holding the HeyDealer cookie string.
pub const KEYRING_COOKIE_KEY: &str = "heydealer/cookie";

/// Fallback environment variable for the HeyDealer cookie.
pub const COOKIE_ENV: &str = "CARSNAP_HEYDEALER_COOKIE";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Directory the photo subfolder is created in. Unset means the user's
    /// Downloads directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,

    #[serde(default = "default_subfolder")]
    pub subfolder: String,

    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Copy the summary to the clipboard after a successful grab.
    #[serde(default = "default_true")]
    pub clipboard: bool,

    #[serde(default)]
    pub conflict_action: ConflictAction,

    #[serde(default)]
    pub sites: Sites,

    #[serde(default)]
    pub heydealer: HeyDealer,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_dir: None,
            subfolder: default_subfolder(),
            timeout: default_timeout(),
            clipboard: true,
            conflict_action: ConflictAction::default(),
            sites: Sites::default(),
            heydealer: HeyDealer::default(),
        }
    }
}

/// Endpoint overrides, mostly useful against a local mock.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Sites {
    #[serde(default = "default_encar_api")]
    pub encar_api: String,
    #[serde(default = "default_encar_cdn")]
    pub encar_cdn: String,
    #[serde(default = "default_heydealer_api")]
    pub heydealer_api: String,
    #[serde(default = "default_heydealer_origin")]
    pub heydealer_origin: String,
}

impl Default for Sites {
    fn default() -> Self {
        Self {
            encar_api: default_encar_api(),
            encar_cdn: default_encar_cdn(),
            heydealer_api: default_heydealer_api(),
            heydealer_origin: default_heydealer_origin(),
        }
    }
}

/// HeyDealer session settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeyDealer {
    /// Cookie string (plaintext, prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,

    /// Environment variable name containing the cookie string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_env: Option<String>,
}

fn default_subfolder() -> String {
    DEFAULT_SUBFOLDER.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}
fn default_encar_api() -> String {
    DEFAULT_ENCAR_API.into()
}
fn default_encar_cdn() -> String {
    DEFAULT_ENCAR_CDN.into()
}
fn default_heydealer_api() -> String {
    DEFAULT_HEYDEALER_API.into()
}
fn default_heydealer_origin() -> String {
    DEFAULT_HEYDEALER_ORIGIN.into()
}

impl Config {
    /// A copy safe to print: the plaintext cookie is masked.
    pub fn redacted(&self) -> Self {
        let mut out = self.clone();
        if out.heydealer.cookie.is_some() {
            out.heydealer.cookie = Some("****".into());
        }
        out
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "carsnap", "carsnap").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("carsnap");
    p
}

/// The user's Downloads directory, or `.` when the platform has none.
pub fn default_download_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

// ── Config loading ──────────────────────────────────────────────────

/// Layered provider: defaults, then the TOML file, then `CARSNAP_*` env
/// (`__` separates sections, e.g. `CARSNAP_SITES__ENCAR_API`).
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CARSNAP_").split("__"))
}

/// Load the full Config from file + environment. A missing file is not an
/// error.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    debug!(path = %path.display(), "loading config");
    let config: Config = figment(&path).extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Default config rendered as TOML, with a header describing the
/// credential options.
pub fn default_config_toml() -> Result<String, ConfigError> {
    let body = toml::to_string_pretty(&Config::default())?;
    Ok(format!(
        "# carsnap configuration\n\
         #\n\
         # download_dir defaults to your Downloads folder.\n\
         # The HeyDealer session cookie is read, in order, from the variable\n\
         # named by heydealer.cookie_env, from {COOKIE_ENV}, from the system\n\
         # keyring (`carsnap config set-cookie`), and finally from\n\
         # heydealer.cookie below.\n\
         \n\
         {body}"
    ))
}

/// Write the default config to `path`. Refuses to replace an existing file
/// unless `force` is set.
pub fn init_config(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::Validation {
            field: "config".into(),
            reason: format!("{} already exists", path.display()),
        });
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, default_config_toml()?)?;
    Ok(())
}

// ── Cookie resolution ───────────────────────────────────────────────

/// Where the HeyDealer cookie came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieSource {
    Env(String),
    Keyring,
    ConfigFile,
}

impl std::fmt::Display for CookieSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env(name) => write!(f, "env:{name}"),
            Self::Keyring => f.write_str("keyring"),
            Self::ConfigFile => f.write_str("config file"),
        }
    }
}

#[derive(Debug)]
pub struct ResolvedCookie {
    pub secret: SecretString,
    pub source: CookieSource,
}

/// Resolve the HeyDealer cookie from the credential chain.
///
/// Returns `None` when nothing is configured; requests then go out
/// without a session.
pub fn resolve_cookie(heydealer: &HeyDealer) -> Option<ResolvedCookie> {
    resolve_cookie_with(heydealer, |name| std::env::var(name).ok(), read_keyring_cookie)
}

fn resolve_cookie_with(
    heydealer: &HeyDealer,
    env: impl Fn(&str) -> Option<String>,
    from_keyring: impl FnOnce() -> Option<String>,
) -> Option<ResolvedCookie> {
    let found = |secret: String, source| {
        (!secret.trim().is_empty()).then(|| ResolvedCookie {
            secret: SecretString::from(secret),
            source,
        })
    };

    // 1. cookie_env → env var lookup
    if let Some(ref name) = heydealer.cookie_env {
        if let Some(c) = env(name).and_then(|v| found(v, CookieSource::Env(name.clone()))) {
            return Some(c);
        }
    }

    // 2. Fixed env var
    if let Some(c) = env(COOKIE_ENV).and_then(|v| found(v, CookieSource::Env(COOKIE_ENV.into())))
    {
        return Some(c);
    }

    // 3. System keyring
    if let Some(c) = from_keyring().and_then(|v| found(v, CookieSource::Keyring)) {
        return Some(c);
    }

    // 4. Plaintext in config
    heydealer
        .cookie
        .clone()
        .and_then(|v| found(v, CookieSource::ConfigFile))
}

fn read_keyring_cookie() -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, KEYRING_COOKIE_KEY)
        .and_then(|entry| entry.get_password())
        .ok()
}

/// Store the HeyDealer cookie in the system keyring.
pub fn store_cookie(cookie: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, KEYRING_COOKIE_KEY)?.set_password(cookie)?;
    Ok(())
}

/// Remove the HeyDealer cookie from the system keyring. Missing entries
/// are not an error.
pub fn delete_cookie() -> Result<(), ConfigError> {
    match keyring::Entry::new(KEYRING_SERVICE, KEYRING_COOKIE_KEY)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

// ── Translation ─────────────────────────────────────────────────────

fn parse_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL '{value}': {e}"),
    })
}

/// Build a `GrabberConfig` with an explicit cookie (no credential lookup).
pub fn build_grabber_config(
    cfg: &Config,
    cookie: Option<SecretString>,
) -> Result<GrabberConfig, ConfigError> {
    if cfg.timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    Ok(GrabberConfig {
        encar_api: parse_url("sites.encar_api", &cfg.sites.encar_api)?,
        encar_cdn: parse_url("sites.encar_cdn", &cfg.sites.encar_cdn)?,
        heydealer_api: parse_url("sites.heydealer_api", &cfg.sites.heydealer_api)?,
        heydealer_origin: parse_url("sites.heydealer_origin", &cfg.sites.heydealer_origin)?,
        heydealer_cookie: cookie,
        download_dir: cfg
            .download_dir
            .clone()
            .unwrap_or_else(default_download_dir),
        subfolder: cfg.subfolder.clone(),
        conflict_action: cfg.conflict_action,
        timeout: Duration::from_secs(cfg.timeout),
    })
}

/// Build a `GrabberConfig`, resolving the HeyDealer cookie from the
/// credential chain.
pub fn to_grabber_config(cfg: &Config) -> Result<GrabberConfig, ConfigError> {
    let cookie = resolve_cookie(&cfg.heydealer).map(|c| {
        debug!(source = %c.source, "using HeyDealer cookie");
        c.secret
    });
    build_grabber_config(cfg, cookie)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use secrecy::ExposeSecret;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn cookie_chain_prefers_named_env() {
        let hd = HeyDealer {
            cookie: Some("plain=1".into()),
            cookie_env: Some("MY_COOKIE".into()),
        };
        let env = |name: &str| match name {
            "MY_COOKIE" => Some("named=1".into()),
            COOKIE_ENV => Some("fixed=1".into()),
            _ => None,
        };

        let c = resolve_cookie_with(&hd, env, || Some("ring=1".into())).unwrap();
        assert_eq!(c.secret.expose_secret(), "named=1");
        assert_eq!(c.source, CookieSource::Env("MY_COOKIE".into()));
    }

    #[test]
    fn cookie_chain_falls_through_in_order() {
        let hd = HeyDealer {
            cookie: Some("plain=1".into()),
            cookie_env: Some("UNSET".into()),
        };

        let fixed = |name: &str| (name == COOKIE_ENV).then(|| "fixed=1".to_string());
        let c = resolve_cookie_with(&hd, fixed, || Some("ring=1".into())).unwrap();
        assert_eq!(c.source, CookieSource::Env(COOKIE_ENV.into()));

        let c = resolve_cookie_with(&hd, no_env, || Some("ring=1".into())).unwrap();
        assert_eq!(c.source, CookieSource::Keyring);

        let c = resolve_cookie_with(&hd, no_env, || None).unwrap();
        assert_eq!(c.source, CookieSource::ConfigFile);
        assert_eq!(c.secret.expose_secret(), "plain=1");
    }

    #[test]
    fn blank_values_are_skipped() {
        let hd = HeyDealer {
            cookie: Some("  ".into()),
            cookie_env: None,
        };
        let blank = |_: &str| Some(String::new());

        assert!(resolve_cookie_with(&hd, blank, || Some(String::new())).is_none());
    }

    #[test]
    fn nothing_configured_means_no_cookie() {
        assert!(resolve_cookie_with(&HeyDealer::default(), no_env, || None).is_none());
    }

    #[test]
    fn redacted_masks_cookie_only() {
        let cfg = Config {
            heydealer: HeyDealer {
                cookie: Some("sessionid=secret".into()),
                cookie_env: Some("MY_COOKIE".into()),
            },
            ..Config::default()
        };

        let shown = cfg.redacted();
        assert_eq!(shown.heydealer.cookie.as_deref(), Some("****"));
        assert_eq!(shown.heydealer.cookie_env.as_deref(), Some("MY_COOKIE"));
        assert_eq!(Config::default().redacted(), Config::default());
    }

    #[test]
    fn grabber_config_from_defaults() {
        let cfg = Config {
            download_dir: Some("/tmp/cars".into()),
            ..Config::default()
        };

        let grabber = build_grabber_config(&cfg, None).unwrap();
        assert_eq!(grabber.encar_api.as_str(), "https://api.encar.com/");
        assert_eq!(grabber.heydealer_origin.host_str(), Some("dealer.heydealer.com"));
        assert_eq!(grabber.download_dir, PathBuf::from("/tmp/cars"));
        assert_eq!(grabber.subfolder, "imageDownloader");
        assert_eq!(grabber.timeout, Duration::from_secs(30));
        assert!(grabber.heydealer_cookie.is_none());
    }

    #[test]
    fn bad_endpoint_is_a_validation_error() {
        let mut cfg = Config::default();
        cfg.sites.heydealer_api = "not a url".into();

        let err = build_grabber_config(&cfg, None).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "sites.heydealer_api")
        );
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = Config {
            timeout: 0,
            ..Config::default()
        };
        assert!(build_grabber_config(&cfg, None).is_err());
    }
}
