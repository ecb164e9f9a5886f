//! Export command - write every summary and record as JSON files

use std::{fs, path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use folio_content::{ContentLoader, Site};
use folio_core::ContentKind;
use serde::Serialize;

use super::load_site;

/// Counts of written and skipped files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportStats {
    pub lists: usize,
    pub records: usize,
    pub skipped: usize,
}

/// Run the export command.
///
/// Writes `<kind>.json` with the summaries and `<kind>/<slug>.json` with each
/// full record. Graphs that fail to load are skipped, as in listings.
pub fn run(config_path: &Path, content: Option<&Path>, output: &Path) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, "Starting export");

    let site = load_site(config_path, content)?;
    let stats = export_site(&site, output)?;

    println!("Export complete:");
    println!("  Lists:   {}", stats.lists);
    println!("  Records: {}", stats.records);
    if stats.skipped > 0 {
        println!("  Skipped: {}", stats.skipped);
    }
    println!("  Output:  {}", output.display());
    println!("  Time:    {:.2?}", start.elapsed());

    Ok(())
}

/// Export all four kinds of `site` into `output`.
pub fn export_site(site: &Site, output: &Path) -> Result<ExportStats> {
    let mut stats = ExportStats::default();
    for kind in ContentKind::ALL {
        match kind {
            ContentKind::Notes => export_kind(site.notes(), output, &mut stats)?,
            ContentKind::Projects => export_kind(site.projects(), output, &mut stats)?,
            ContentKind::Roadmaps => export_kind(site.roadmaps(), output, &mut stats)?,
            ContentKind::Graphs => export_kind(site.graphs(), output, &mut stats)?,
        }
    }
    Ok(stats)
}

fn export_kind<L: ContentLoader>(loader: &L, output: &Path, stats: &mut ExportStats) -> Result<()> {
    let kind = loader.kind();
    let record_dir = output.join(kind.as_str());
    fs::create_dir_all(&record_dir)
        .wrap_err_with(|| format!("Failed to create {}", record_dir.display()))?;

    let summaries = loader
        .list_all()
        .wrap_err_with(|| format!("Failed to list {kind}"))?;
    write_json(&output.join(format!("{kind}.json")), &summaries)?;
    stats.lists += 1;

    for slug in loader.slugs()? {
        match loader.get(&slug) {
            Ok(Some(record)) => {
                write_json(&record_dir.join(format!("{slug}.json")), &record)?;
                stats.records += 1;
            }
            Ok(None) => {}
            Err(e) if e.is_malformed_content() => {
                tracing::warn!(%kind, %slug, error = %e, "Skipping record");
                stats.skipped += 1;
            }
            Err(e) => return Err(e).wrap_err_with(|| format!("Failed to load {kind}/{slug}")),
        }
    }

    tracing::debug!(%kind, dir = %record_dir.display(), "Exported");
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).wrap_err("Failed to serialize content")?;
    fs::write(path, text).wrap_err_with(|| format!("Failed to write {}", path.display()))
}
