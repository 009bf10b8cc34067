// Shared transport configuration for building reqwest::Client instances.
//
// The listing clients, the media client and the relay share timeout,
// user-agent and cookie settings through this module, avoiding duplicated
// builder logic.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::Error;

const USER_AGENT: &str = concat!("carsnap/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub cookie_jar: Option<Arc<Jar>>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            cookie_jar: None,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// When a cookie jar is attached the client sends and stores cookies
    /// through it, which is what makes relay fetches "credentialed".
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);

        if let Some(ref jar) = self.cookie_jar {
            builder = builder.cookie_provider(Arc::clone(jar));
        }

        builder
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }

    /// The attached cookie jar, creating one if none is set yet.
    pub fn jar(&mut self) -> Arc<Jar> {
        Arc::clone(
            self.cookie_jar
                .get_or_insert_with(|| Arc::new(Jar::default())),
        )
    }
}

// ── Cookie helpers ──────────────────────────────────────────────────

/// Seed a jar with `name=value; name2=value2` pairs scoped to `origin`.
///
/// Returns the number of cookies added. Empty pairs and pairs without an
/// `=` are skipped.
pub fn seed_cookies(jar: &Jar, origin: &Url, raw: &SecretString) -> usize {
    let mut added = 0;
    for pair in raw.expose_secret().split(';') {
        let pair = pair.trim();
        let Some((name, _)) = pair.split_once('=') else {
            continue;
        };
        if name.trim().is_empty() {
            continue;
        }
        jar.add_cookie_str(pair, origin);
        added += 1;
    }
    debug!(origin = %origin, count = added, "seeded cookie jar");
    added
}

/// Serialize every cookie the store holds for `origin` into a `Cookie`
/// header value (`a=1; b=2`). Returns `None` when there are none.
pub fn cookie_header(store: &impl CookieStore, origin: &Url) -> Option<String> {
    let value = store.cookies(origin)?;
    value
        .to_str()
        .ok()
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn origin() -> Url {
        Url::parse("https://dealer.heydealer.com").unwrap()
    }

    #[test]
    fn seeds_and_serializes_cookie_pairs() {
        let jar = Jar::default();
        let raw = SecretString::from("sessionid=abc; csrftoken=xyz".to_string());

        assert_eq!(seed_cookies(&jar, &origin(), &raw), 2);

        let header = cookie_header(&jar, &origin()).unwrap();
        assert!(header.contains("sessionid=abc"), "{header}");
        assert!(header.contains("csrftoken=xyz"), "{header}");
    }

    #[test]
    fn skips_malformed_pairs() {
        let jar = Jar::default();
        let raw = SecretString::from("; junk ;=novalue; ok=1".to_string());

        assert_eq!(seed_cookies(&jar, &origin(), &raw), 1);
        assert_eq!(cookie_header(&jar, &origin()).as_deref(), Some("ok=1"));
    }

    #[test]
    fn empty_jar_has_no_header() {
        let jar = Jar::default();
        assert_eq!(cookie_header(&jar, &origin()), None);
    }

    #[test]
    fn cookies_stay_on_their_origin() {
        let jar = Jar::default();
        let raw = SecretString::from("sessionid=abc".to_string());
        seed_cookies(&jar, &origin(), &raw);

        let other = Url::parse("https://www.encar.com").unwrap();
        assert_eq!(cookie_header(&jar, &other), None);
    }
}
