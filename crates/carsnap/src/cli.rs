//! Clap derive structures for the `carsnap` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// carsnap -- grab every photo of a car listing
#[derive(Debug, Parser)]
#[command(
    name = "carsnap",
    version,
    about = "Download car listing photos from Encar and HeyDealer",
    long_about = "Download every photo of an Encar or HeyDealer car listing into one folder\n\
        and copy a short summary of the car (model, mileage, fuel, engine, price)\n\
        to the clipboard.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file to use instead of the platform default
    #[arg(long, env = "CARSNAP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory the photo subfolder is created in
    #[arg(long, short = 'd', global = true)]
    pub download_dir: Option<PathBuf>,

    /// Subfolder photos are saved to
    #[arg(long, global = true)]
    pub subfolder: Option<String>,

    /// Do not copy the summary to the clipboard
    #[arg(long, global = true)]
    pub no_clipboard: bool,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnConflict {
    /// Save as `name (1).jpg`, `name (2).jpg`, ...
    Uniquify,
    /// Replace the existing file
    Overwrite,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download all photos of a listing and copy its summary
    #[command(alias = "g")]
    Grab(GrabArgs),

    /// Show which site and listing ID a page URL points to
    Resolve(PageArgs),

    /// Fetch a listing and print its summary and photos without downloading
    Show(PageArgs),

    /// Perform one credentialed GET and print the {data}|{error} envelope
    Relay(RelayArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct PageArgs {
    /// URL of an Encar or HeyDealer listing page
    pub url: String,
}

#[derive(Debug, Args)]
pub struct GrabArgs {
    /// URL of an Encar or HeyDealer listing page
    pub url: String,

    /// What to do when a photo with the same name already exists
    #[arg(long)]
    pub on_conflict: Option<OnConflict>,
}

#[derive(Debug, Args)]
pub struct RelayArgs {
    /// URL to fetch; the body must be JSON
    pub url: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display the effective configuration (cookie redacted)
    Show,

    /// Write a default config file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Store the HeyDealer session cookie (read from stdin) in the system keyring
    SetCookie,

    /// Remove the HeyDealer session cookie from the system keyring
    ClearCookie,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
