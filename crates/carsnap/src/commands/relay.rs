//! `carsnap relay`: one credentialed GET through the relay task.

use tokio_util::sync::CancellationToken;

use carsnap_api::{Relay, RelayResponse};

use crate::cli::{GlobalOpts, RelayArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: RelayArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let transport = config::grabber_config(&cfg, global, None)?.transport();
    let http = transport
        .build_client()
        .map_err(|e| CliError::Internal(e.to_string()))?;

    let cancel = CancellationToken::new();
    let (handle, task) = Relay::new(http).spawn(cancel.clone());
    let response = handle.fetch(args.url).await;
    cancel.cancel();
    let _ = task.await;

    // The envelope is the output, whatever the outcome.
    output::print_output(&output::render_json(&response)?, global.quiet);

    match response {
        RelayResponse::Data(_) => Ok(()),
        RelayResponse::Error(message) => Err(CliError::Relay { message }),
    }
}
