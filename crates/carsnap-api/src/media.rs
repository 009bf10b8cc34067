// Photo CDN client
//
// Plain GETs against whatever host a photo URL points at. Kept separate
// from the listing clients because the failure shape differs: a bad photo
// is a per-item error, not an API error.

use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Fetches photo bytes.
#[derive(Debug, Clone)]
pub struct MediaClient {
    http: reqwest::Client,
}

impl MediaClient {
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
        })
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Download the full body of `url`.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, Error> {
        let url = Url::parse(url)?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Media {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().await.map_err(Error::Transport)?;
        Ok(bytes.to_vec())
    }
}
