//! Show command - print one full record

use std::path::Path;

use color_eyre::eyre::{Result, eyre};
use folio_core::ContentKind;

use super::{load_site, print_json, record};

/// Run the show command.
///
/// Fails when no record of `kind` is named `slug`.
pub fn run(config_path: &Path, content: Option<&Path>, kind: ContentKind, slug: &str) -> Result<()> {
    tracing::info!(?config_path, %kind, slug, "Showing content");

    let site = load_site(config_path, content)?;
    let value = record(&site, kind, slug)?.ok_or_else(|| eyre!("No {kind} found for '{slug}'"))?;
    print_json(&value)
}
