//! `carsnap show`: fetch a listing and print what a grab would save,
//! without downloading or touching the clipboard.

use tabled::Tabled;

use carsnap_core::{Grabber, Listing, PhotoEntry};

use crate::cli::{GlobalOpts, PageArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PhotoRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Filename")]
    filename: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl PhotoRow {
    fn new(index: usize, photo: &PhotoEntry) -> Self {
        Self {
            index: index + 1,
            filename: photo.filename.clone(),
            url: photo.image_url.clone(),
        }
    }
}

fn detail(listing: &Listing) -> String {
    let header = output::render_detail(&[
        ("Site", listing.reference.site.to_string()),
        ("ID", listing.reference.id.clone()),
        ("Photos", listing.photos.len().to_string()),
    ]);
    let photos: Vec<PhotoRow> = listing
        .photos
        .iter()
        .enumerate()
        .map(|(i, p)| PhotoRow::new(i, p))
        .collect();
    format!(
        "{header}\n{}\n{}",
        listing.summary,
        output::render_table(&photos)
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: &PageArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let grabber = Grabber::from_config(&config::grabber_config(&cfg, global, None)?)?;

    let listing = grabber.preview(&args.url).await?;

    let out = output::render_single(global.output, &listing, detail, |l| {
        l.photos
            .iter()
            .map(|p| p.image_url.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
