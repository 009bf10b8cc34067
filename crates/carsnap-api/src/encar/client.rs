// Encar HTTP client
//
// Wraps `reqwest::Client` with URL construction for the read-side API.
// No credentials are involved; the endpoint is public.

use tracing::debug;
use url::Url;

use crate::encar::models::EncarVehicle;
use crate::error::Error;
use crate::response::parse_json;
use crate::transport::TransportConfig;

/// Site name used in error messages.
pub const SITE_NAME: &str = "Encar";

/// Raw HTTP client for the Encar read-side API.
#[derive(Debug, Clone)]
pub struct EncarClient {
    http: reqwest::Client,
    base_url: Url,
}

impl EncarClient {
    /// Production API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.encar.com";

    /// Create a new client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Build `{base}/v1/readside/vehicle/{id}`.
    pub(crate) fn vehicle_url(&self, id: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/v1/readside/vehicle/{id}"))?)
    }

    /// Fetch one listing.
    ///
    /// `GET /v1/readside/vehicle/{id}`
    pub async fn get_vehicle(&self, id: &str) -> Result<EncarVehicle, Error> {
        let url = self.vehicle_url(id)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        parse_json(SITE_NAME, resp).await
    }
}
