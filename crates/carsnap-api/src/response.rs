// Response handling shared by the listing clients.

use serde::de::DeserializeOwned;

use crate::error::Error;

/// Check the status of a listing API response and decode its JSON body.
///
/// Any non-2xx status becomes `Error::Api` carrying the canonical reason
/// phrase; the body of a failed response is not inspected.
pub(crate) async fn parse_json<T: DeserializeOwned>(
    site: &'static str,
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();

    if !status.is_success() {
        return Err(Error::Api {
            site,
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_owned(),
        });
    }

    let body = resp.text().await.map_err(Error::Transport)?;

    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}
