// ── Runtime configuration ──
//
// Describes *where* to fetch listings and *where* to put photos. Carries the
// HeyDealer session cookie but never touches disk; the CLI builds a
// `GrabberConfig` from its config file and flags and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use carsnap_api::TransportConfig;
use carsnap_api::transport::seed_cookies;
use secrecy::SecretString;
use url::Url;

use crate::download::ConflictAction;

/// Folder, relative to the download directory, that receives photos.
pub const DEFAULT_SUBFOLDER: &str = "imageDownloader";

/// Image CDN serving Encar photo paths.
pub const DEFAULT_ENCAR_CDN: &str = "https://ci.encar.com";

pub const DEFAULT_ENCAR_API: &str = carsnap_api::EncarClient::DEFAULT_BASE_URL;
pub const DEFAULT_HEYDEALER_API: &str = carsnap_api::HeyDealerClient::DEFAULT_BASE_URL;
pub const DEFAULT_HEYDEALER_ORIGIN: &str = carsnap_api::HeyDealerClient::DEFAULT_ORIGIN;

/// Configuration for one `Grabber`.
#[derive(Debug, Clone)]
pub struct GrabberConfig {
    /// Encar API root.
    pub encar_api: Url,
    /// Encar image CDN root.
    pub encar_cdn: Url,
    /// HeyDealer API root.
    pub heydealer_api: Url,
    /// Origin that owns the HeyDealer session cookies.
    pub heydealer_origin: Url,
    /// `name=value; ...` cookie string for the HeyDealer origin.
    pub heydealer_cookie: Option<SecretString>,
    /// Directory the subfolder is created in.
    pub download_dir: PathBuf,
    /// Subfolder photos are saved to.
    pub subfolder: String,
    /// What to do when a photo's filename is already taken.
    pub conflict_action: ConflictAction,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GrabberConfig {
    /// Transport shared by every client of one `Grabber` (and the relay).
    ///
    /// The cookie jar is seeded with the HeyDealer session cookie, scoped to
    /// the dealer origin.
    pub fn transport(&self) -> TransportConfig {
        let mut transport = TransportConfig {
            timeout: self.timeout,
            cookie_jar: None,
        };
        let jar = transport.jar();
        if let Some(ref cookie) = self.heydealer_cookie {
            seed_cookies(&jar, &self.heydealer_origin, cookie);
        }
        transport
    }
}

impl Default for GrabberConfig {
    fn default() -> Self {
        Self {
            encar_api: Url::parse(DEFAULT_ENCAR_API).expect("default Encar API URL is valid"),
            encar_cdn: Url::parse(DEFAULT_ENCAR_CDN).expect("default Encar CDN URL is valid"),
            heydealer_api: Url::parse(DEFAULT_HEYDEALER_API)
                .expect("default HeyDealer API URL is valid"),
            heydealer_origin: Url::parse(DEFAULT_HEYDEALER_ORIGIN)
                .expect("default HeyDealer origin is valid"),
            heydealer_cookie: None,
            download_dir: PathBuf::from("."),
            subfolder: DEFAULT_SUBFOLDER.into(),
            conflict_action: ConflictAction::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use carsnap_api::transport::cookie_header;

    use super::*;

    #[test]
    fn transport_seeds_heydealer_cookie_on_origin() {
        let config = GrabberConfig {
            heydealer_cookie: Some(SecretString::from("sessionid=abc".to_string())),
            ..GrabberConfig::default()
        };

        let transport = config.transport();
        let jar = transport.cookie_jar.unwrap();

        assert_eq!(
            cookie_header(jar.as_ref(), &config.heydealer_origin).as_deref(),
            Some("sessionid=abc")
        );
    }

    #[test]
    fn transport_without_cookie_has_empty_jar() {
        let transport = GrabberConfig::default().transport();
        let jar = transport.cookie_jar.unwrap();
        let origin = Url::parse(DEFAULT_HEYDEALER_ORIGIN).unwrap();

        assert_eq!(cookie_header(jar.as_ref(), &origin), None);
    }
}
