//! `carsnap resolve`: page URL classification only, no network.

use carsnap_core::{ListingReference, classify};

use crate::cli::{GlobalOpts, PageArgs};
use crate::error::CliError;
use crate::output;

fn detail(reference: &ListingReference) -> String {
    output::render_detail(&[
        ("Site", reference.site.to_string()),
        ("ID", reference.id.clone()),
    ])
}

pub fn handle(args: &PageArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let reference = classify(&args.url)?;
    let out = output::render_single(global.output, &reference, detail, |r| {
        format!("{}\n{}", r.site.as_ref().to_lowercase(), r.id)
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
