//! Command dispatch: bridges CLI args -> core actions -> output formatting.

pub mod config_cmd;
pub mod grab;
pub mod relay;
pub mod resolve;
pub mod show;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a listing command to its handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Grab(args) => grab::handle(&args, global).await,
        Command::Resolve(args) => resolve::handle(&args, global),
        Command::Show(args) => show::handle(&args, global).await,
        Command::Relay(args) => relay::handle(args, global).await,
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Completions(_) => Err(CliError::Internal(
            "completions are generated before dispatch".into(),
        )),
    }
}
