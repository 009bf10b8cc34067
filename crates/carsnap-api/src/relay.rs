// Credentialed fetch relay
//
// A background task that performs GETs on behalf of callers that cannot
// (or should not) hold the credentialed client themselves. Requests arrive
// over an mpsc channel, each carrying a oneshot reply sender; every request
// is served on its own task and answered exactly once. Failures come back as
// data (`{"error": ...}`), never as a panic or a dropped channel.

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const REQUEST_CHANNEL_SIZE: usize = 32;

/// Reply to a relay request. Serializes as `{"data": ...}` or
/// `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayResponse {
    Data(serde_json::Value),
    Error(String),
}

impl RelayResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// A request travelling to the relay task.
#[derive(Debug)]
struct RelayRequest {
    url: String,
    reply: oneshot::Sender<RelayResponse>,
}

/// Performs one credentialed GET per request.
///
/// The wrapped client should carry the cookie jar whose cookies are to be
/// included (see [`TransportConfig::jar`](crate::TransportConfig::jar)).
#[derive(Debug, Clone)]
pub struct Relay {
    http: reqwest::Client,
}

impl Relay {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch `url` and decode the body as JSON. One attempt, no retries.
    ///
    /// The HTTP status is not inspected: a JSON error body from the remote
    /// is still returned as `data`.
    pub async fn fetch_once(&self, url: &str) -> RelayResponse {
        debug!("relay GET {}", url);

        let result = async {
            let resp = self
                .http
                .get(url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .send()
                .await?;
            resp.json::<serde_json::Value>().await
        }
        .await;

        match result {
            Ok(data) => RelayResponse::Data(data),
            Err(e) => {
                warn!(url, error = %e, "relay fetch failed");
                RelayResponse::Error(e.to_string())
            }
        }
    }

    /// Start the relay task. It runs until `cancel` fires or every
    /// [`RelayHandle`] has been dropped.
    pub fn spawn(self, cancel: CancellationToken) -> (RelayHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(REQUEST_CHANNEL_SIZE);
        let task = tokio::spawn(relay_task(self, rx, cancel));
        (RelayHandle { tx }, task)
    }
}

/// Cheaply cloneable sender side of a running relay.
#[derive(Debug, Clone)]
pub struct RelayHandle {
    tx: mpsc::Sender<RelayRequest>,
}

impl RelayHandle {
    /// Ask the relay to fetch `url` and wait for its single reply.
    pub async fn fetch(&self, url: impl Into<String>) -> RelayResponse {
        let (reply, rx) = oneshot::channel();
        let request = RelayRequest {
            url: url.into(),
            reply,
        };

        if self.tx.send(request).await.is_err() {
            return RelayResponse::Error("relay is not running".into());
        }

        rx.await
            .unwrap_or_else(|_| RelayResponse::Error("relay dropped the request".into()))
    }
}

async fn relay_task(
    relay: Relay,
    mut rx: mpsc::Receiver<RelayRequest>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            request = rx.recv() => {
                let Some(RelayRequest { url, reply }) = request else { break };
                let relay = relay.clone();
                // Reply from a per-request task so one slow fetch doesn't
                // hold up the queue.
                tokio::spawn(async move {
                    let response = relay.fetch_once(&url).await;
                    let _ = reply.send(response);
                });
            }
        }
    }
    debug!("relay task stopped");
}
