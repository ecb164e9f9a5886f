//! Command implementations.

pub mod check;
pub mod export;
pub mod list;
pub mod show;
pub mod tags;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use folio_content::{ContentLoader, Site};
use folio_core::{Config, ContentKind};
use serde::Serialize;
use serde_json::Value;

/// Load the configuration and build the site.
///
/// A missing configuration file means built-in defaults. `FOLIO__…`
/// environment variables override file values, and `content` overrides the
/// content root.
pub fn load_site(config_path: &Path, content: Option<&Path>) -> Result<Site> {
    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    if config_path.exists() {
        config = config.relative_to(config_path);
    } else {
        tracing::debug!(?config_path, "No configuration file, using defaults");
    }

    if let Some(root) = content {
        tracing::info!(root = %root.display(), "Overriding content root from CLI");
        config.content.root = root.to_path_buf();
    }

    tracing::debug!(?config, "Loaded configuration");
    Ok(Site::new(&config))
}

/// Summaries of one kind as JSON.
pub fn summaries(site: &Site, kind: ContentKind) -> Result<Value> {
    match kind {
        ContentKind::Notes => summaries_of(site.notes()),
        ContentKind::Projects => summaries_of(site.projects()),
        ContentKind::Roadmaps => summaries_of(site.roadmaps()),
        ContentKind::Graphs => summaries_of(site.graphs()),
    }
}

/// One full record as JSON, or `None` when the slug does not exist.
pub fn record(site: &Site, kind: ContentKind, slug: &str) -> Result<Option<Value>> {
    match kind {
        ContentKind::Notes => record_of(site.notes(), slug),
        ContentKind::Projects => record_of(site.projects(), slug),
        ContentKind::Roadmaps => record_of(site.roadmaps(), slug),
        ContentKind::Graphs => record_of(site.graphs(), slug),
    }
}

fn summaries_of<L: ContentLoader>(loader: &L) -> Result<Value> {
    let items = loader
        .list_all()
        .wrap_err_with(|| format!("Failed to list {}", loader.kind()))?;
    to_json(&items)
}

fn record_of<L: ContentLoader>(loader: &L, slug: &str) -> Result<Option<Value>> {
    let record = loader
        .get(slug)
        .wrap_err_with(|| format!("Failed to load {}/{slug}", loader.kind()))?;
    record.as_ref().map(to_json).transpose()
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).wrap_err("Failed to serialize content")
}

/// Pretty-print JSON to stdout.
pub fn print_json(value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).wrap_err("Failed to serialize content")?;
    println!("{text}");
    Ok(())
}
