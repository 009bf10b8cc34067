//! `carsnap grab`: the full action. Downloads every photo, prints the
//! status line and copies the summary.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::warn;

use carsnap_core::{DownloadEvent, DownloadReport, Grabber, Listing};

use crate::cli::{GlobalOpts, GrabArgs, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;
use crate::view::{self, ViewOptions};

#[derive(Serialize)]
struct GrabView<'a> {
    listing: &'a Listing,
    downloads: &'a DownloadReport,
}

fn progress_bar(global: &GlobalOpts) -> ProgressBar {
    if global.quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_message("fetching listing");
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn on_event(bar: &ProgressBar, event: &DownloadEvent) {
    match event {
        DownloadEvent::Started { total } => {
            if let Ok(style) = ProgressStyle::with_template(
                "{spinner} [{bar:30}] {pos}/{len} {wide_msg}",
            ) {
                bar.set_style(style.progress_chars("=> "));
            }
            bar.set_length(u64::try_from(*total).unwrap_or(u64::MAX));
            bar.set_message("downloading");
        }
        DownloadEvent::Saved { path, .. } => {
            bar.set_message(path.display().to_string());
            bar.inc(1);
        }
        DownloadEvent::Failed {
            filename, message, ..
        } => {
            bar.suspend(|| warn!(%filename, %message, "photo skipped"));
            bar.inc(1);
        }
    }
}

pub async fn handle(args: &GrabArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let grabber = Grabber::from_config(&config::grabber_config(&cfg, global, args.on_conflict)?)?;

    let bar = progress_bar(global);
    let report = grabber
        .run_with(&args.url, |event| on_event(&bar, &event))
        .await;
    bar.finish_and_clear();

    let structured = matches!(global.output, OutputFormat::Json | OutputFormat::Yaml);
    view::apply(
        &report.intents,
        ViewOptions {
            stdout_color: output::stdout_color(global.color),
            stderr_color: output::stderr_color(global.color),
            quiet: global.quiet,
            clipboard: cfg.clipboard,
            structured,
        },
    );

    let outcome = report.outcome?;
    if structured {
        let data = GrabView {
            listing: &outcome.listing,
            downloads: &outcome.downloads,
        };
        let out = output::render_single(global.output, &data, |_| String::new(), |_| String::new())?;
        output::print_output(&out, global.quiet);
    }
    Ok(())
}
