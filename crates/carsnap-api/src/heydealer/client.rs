// HeyDealer HTTP client
//
// The dealer API authenticates with the session cookies of the dealer web
// app. Those cookies are scoped to the web origin, not the API host, so the
// client reads them out of the shared jar and sends them as an explicit
// `Cookie` header.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::header::COOKIE;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::heydealer::models::HeyDealerCar;
use crate::response::parse_json;
use crate::transport::{TransportConfig, cookie_header};

/// Site name used in error messages.
pub const SITE_NAME: &str = "HeyDealer";

/// Raw HTTP client for the HeyDealer dealer API.
#[derive(Debug, Clone)]
pub struct HeyDealerClient {
    http: reqwest::Client,
    base_url: Url,
    /// Origin whose cookies authenticate API calls.
    origin: Url,
    cookie_jar: Arc<Jar>,
}

impl HeyDealerClient {
    /// Production API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.heydealer.com";

    /// Dealer web app origin that owns the session cookies.
    pub const DEFAULT_ORIGIN: &'static str = "https://dealer.heydealer.com";

    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, an empty one is
    /// created and requests go out without a `Cookie` header.
    pub fn new(base_url: Url, origin: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let mut config = transport.clone();
        let cookie_jar = config.jar();
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            origin,
            cookie_jar,
        })
    }

    /// Create a client with a pre-built `reqwest::Client` and cookie jar.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        origin: Url,
        cookie_jar: Arc<Jar>,
    ) -> Self {
        Self {
            http,
            base_url,
            origin,
            cookie_jar,
        }
    }

    /// Current `Cookie` header value for the dealer origin, if any.
    pub fn cookie_header(&self) -> Option<String> {
        cookie_header(self.cookie_jar.as_ref(), &self.origin)
    }

    /// Build `{base}/v2/dealers/web/cars/{id}`.
    pub(crate) fn car_url(&self, id: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/v2/dealers/web/cars/{id}"))?)
    }

    /// Fetch one car with the dealer session cookies attached.
    ///
    /// `GET /v2/dealers/web/cars/{id}`
    pub async fn get_car(&self, id: &str) -> Result<HeyDealerCar, Error> {
        let url = self.car_url(id)?;
        debug!("GET {}", url);

        let mut builder = self.http.get(url);
        match self.cookie_header() {
            Some(cookies) => builder = builder.header(COOKIE, cookies),
            None => debug!(origin = %self.origin, "no session cookies for origin"),
        }

        let resp = builder.send().await.map_err(Error::Transport)?;

        parse_json(SITE_NAME, resp).await
    }
}
