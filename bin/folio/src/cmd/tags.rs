//! Tags command - print the tags used by notes or projects

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, bail};
use folio_content::Site;
use folio_core::ContentKind;

use super::load_site;

/// Run the tags command.
pub fn run(config_path: &Path, content: Option<&Path>, kind: ContentKind) -> Result<()> {
    let site = load_site(config_path, content)?;
    for tag in collect(&site, kind)? {
        println!("{tag}");
    }
    Ok(())
}

/// Sorted, deduplicated tags of `kind`.
pub fn collect(site: &Site, kind: ContentKind) -> Result<Vec<String>> {
    let tags = match kind {
        ContentKind::Notes => site.notes().all_tags(),
        ContentKind::Projects => site.projects().all_tags(),
        other => bail!("{other} have no tags (expected notes or projects)"),
    };
    tags.wrap_err_with(|| format!("Failed to collect {kind} tags"))
}
