//! Config subcommand handlers.

use std::io::BufRead;

use carsnap_config::{ConfigError, resolve_cookie};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

fn keyring_err(err: &ConfigError) -> CliError {
    CliError::Config {
        message: err.to_string(),
        path: "system keyring".into(),
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::active_path(global);

    match args.command {
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load(global)?.redacted();
            let out = match global.output {
                OutputFormat::Json => output::render_json(&cfg)?,
                OutputFormat::Yaml => output::render_yaml(&cfg)?,
                OutputFormat::Table | OutputFormat::Plain => toml::to_string_pretty(&cfg)
                    .map_err(|e| CliError::Serialization(e.to_string()))?,
            };
            output::print_output(&out, global.quiet);

            if !global.quiet {
                match resolve_cookie(&cfg.heydealer) {
                    Some(cookie) => eprintln!("HeyDealer cookie: set ({})", cookie.source),
                    None => eprintln!("HeyDealer cookie: not set"),
                }
            }
            Ok(())
        }

        ConfigCommand::Init { force } => {
            carsnap_config::init_config(&path, force)
                .map_err(|e| CliError::from_config(e, &path))?;
            if !global.quiet {
                eprintln!("Wrote {}", path.display());
            }
            Ok(())
        }

        ConfigCommand::SetCookie => {
            if !global.quiet {
                eprintln!("Paste the dealer.heydealer.com cookie string, then press Enter:");
            }
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            let cookie = line.trim();
            if cookie.is_empty() {
                return Err(CliError::ConfigInvalid {
                    field: "cookie".into(),
                    reason: "cookie cannot be empty".into(),
                    path: "stdin".into(),
                });
            }
            carsnap_config::store_cookie(cookie).map_err(|e| keyring_err(&e))?;
            if !global.quiet {
                eprintln!("✓ cookie stored in system keyring");
            }
            Ok(())
        }

        ConfigCommand::ClearCookie => {
            carsnap_config::delete_cookie().map_err(|e| keyring_err(&e))?;
            if !global.quiet {
                eprintln!("✓ cookie removed from system keyring");
            }
            Ok(())
        }
    }
}
