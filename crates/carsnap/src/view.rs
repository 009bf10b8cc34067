//! Applies the side effects requested by an action: the status line, the
//! alert, and the clipboard write.

use owo_colors::OwoColorize;
use tracing::{debug, warn};

use carsnap_core::{Intent, Tone};

/// How intents are rendered.
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    pub stdout_color: bool,
    pub stderr_color: bool,
    pub quiet: bool,
    pub clipboard: bool,
    /// Structured output replaces the success status line.
    pub structured: bool,
}

/// Apply intents in order.
///
/// Info status goes to stdout, alert status to stderr. `Alert` intents are
/// not printed here: the failed command's error report carries the same
/// message.
pub fn apply(intents: &[Intent], opts: ViewOptions) {
    for intent in intents {
        match intent {
            Intent::Status {
                tone: Tone::Info,
                text,
            } => {
                if opts.quiet || opts.structured {
                    continue;
                }
                if opts.stdout_color {
                    println!("{}", text.green());
                } else {
                    println!("{text}");
                }
            }
            Intent::Status {
                tone: Tone::Alert,
                text,
            } => {
                if opts.stderr_color {
                    eprintln!("{}", text.red());
                } else {
                    eprintln!("{text}");
                }
            }
            Intent::Alert(message) => debug!(%message, "alert deferred to error report"),
            Intent::CopyToClipboard(text) => {
                if opts.clipboard {
                    copy_to_clipboard(text);
                }
            }
        }
    }
}

/// Best effort: a missing clipboard (headless session, no display) is a
/// warning, never a failure of the action.
fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => debug!("summary copied to clipboard"),
        Err(e) => warn!(error = %e, "could not copy summary to clipboard"),
    }
}
