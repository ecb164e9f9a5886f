//! All four loaders behind one facade.

use std::path::{Path, PathBuf};

use folio_core::{Config, ContentKind, config::ContentConfig, frontmatter::parse_front_matter};
use tracing::{debug, info};

use crate::{
    error::Result,
    graph::GraphLoader,
    loader::ContentLoader,
    posts::PostLoader,
    projects::ProjectLoader,
    roadmap::RoadmapLoader,
};

/// The content of one site.
#[derive(Debug, Clone)]
pub struct Site {
    root: PathBuf,
    notes: PostLoader,
    projects: ProjectLoader,
    roadmaps: RoadmapLoader,
    graphs: GraphLoader,
}

impl Site {
    /// Build loaders for the directories named in `config`.
    pub fn new(config: &Config) -> Self {
        Self::with_layout(&config.content)
    }

    /// Build loaders for the default layout under `root`.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        Self::with_layout(&ContentConfig {
            root: root.into(),
            ..ContentConfig::default()
        })
    }

    fn with_layout(content: &ContentConfig) -> Self {
        Self {
            root: content.root.clone(),
            notes: PostLoader::new(content.dir_for(ContentKind::Notes)),
            projects: ProjectLoader::new(content.dir_for(ContentKind::Projects)),
            roadmaps: RoadmapLoader::new(content.dir_for(ContentKind::Roadmaps)),
            graphs: GraphLoader::new(content.dir_for(ContentKind::Graphs)),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn notes(&self) -> &PostLoader {
        &self.notes
    }

    pub fn projects(&self) -> &ProjectLoader {
        &self.projects
    }

    pub fn roadmaps(&self) -> &RoadmapLoader {
        &self.roadmaps
    }

    pub fn graphs(&self) -> &GraphLoader {
        &self.graphs
    }

    /// Load every record of every kind and collect problems.
    ///
    /// Malformed front-matter and broken graphs are reported as errors.
    /// Graph edges pointing at unknown nodes are warnings. IO failures abort
    /// the check.
    pub fn check(&self) -> Result<CheckReport> {
        let mut report = CheckReport {
            root_exists: self.root.is_dir(),
            ..CheckReport::default()
        };

        check_kind(&self.notes, &mut report, |_| Vec::new())?;
        check_kind(&self.projects, &mut report, |_| Vec::new())?;
        check_kind(&self.roadmaps, &mut report, |_| Vec::new())?;
        check_kind(&self.graphs, &mut report, |graph| {
            graph
                .graph_data
                .dangling_edges()
                .into_iter()
                .map(|edge| {
                    format!(
                        "edge '{}' connects unknown nodes ({} -> {})",
                        edge.id, edge.source, edge.target
                    )
                })
                .collect()
        })?;

        info!(
            checked = report.checked,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "content check finished"
        );
        Ok(report)
    }
}

fn check_kind<L>(
    loader: &L,
    report: &mut CheckReport,
    inspect: impl Fn(&L::Record) -> Vec<String>,
) -> Result<()>
where
    L: ContentLoader,
{
    let kind = loader.kind();

    for entry in loader.dir().entries()? {
        debug!(%kind, slug = %entry.slug, "checking");
        report.checked += 1;

        if entry.extension == "md" {
            let raw = loader.dir().read(&entry.path)?;
            if let Err(e) = parse_front_matter(&raw, &entry.path) {
                report.errors.push(Finding::new(kind, &entry.slug, e.to_string()));
            }
        }

        match loader.get(&entry.slug) {
            Ok(Some(record)) => {
                for message in inspect(&record) {
                    report.warnings.push(Finding::new(kind, &entry.slug, message));
                }
            }
            Ok(None) => {}
            Err(e) if e.is_malformed_content() => {
                report.errors.push(Finding::new(kind, &entry.slug, e.to_string()));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Outcome of [`Site::check`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Number of files inspected.
    pub checked: usize,
    pub root_exists: bool,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A problem found in one content file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub kind: ContentKind,
    pub slug: String,
    pub message: String,
}

impl Finding {
    fn new(kind: ContentKind, slug: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            slug: slug.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}: {}", self.kind, self.slug, self.message)
    }
}
