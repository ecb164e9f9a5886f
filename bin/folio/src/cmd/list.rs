//! List command - print summaries of one kind

use std::path::Path;

use color_eyre::eyre::Result;
use folio_core::ContentKind;

use super::{load_site, print_json, summaries};

/// Run the list command.
///
/// Prints the summaries of `kind`, newest first, as a JSON array.
pub fn run(config_path: &Path, content: Option<&Path>, kind: ContentKind) -> Result<()> {
    tracing::info!(?config_path, %kind, "Listing content");

    let site = load_site(config_path, content)?;
    print_json(&summaries(&site, kind)?)
}
