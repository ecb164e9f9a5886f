//! Site configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    kind::ContentKind,
};

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Where content lives on disk.
    #[serde(default)]
    pub content: ContentConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Site author name.
    #[serde(default)]
    pub author: Option<String>,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: Option<String>,
}

/// Content directory layout.
///
/// Per-kind directories are resolved relative to `root`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Content root directory.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default = "default_notes")]
    pub notes: String,

    #[serde(default = "default_projects")]
    pub projects: String,

    #[serde(default = "default_roadmaps")]
    pub roadmaps: String,

    #[serde(default = "default_graphs")]
    pub graphs: String,
}

fn default_title() -> String {
    "Folio".to_string()
}

fn default_root() -> PathBuf {
    PathBuf::from("content")
}

fn default_notes() -> String {
    ContentKind::Notes.as_str().to_string()
}

fn default_projects() -> String {
    ContentKind::Projects.as_str().to_string()
}

fn default_roadmaps() -> String {
    ContentKind::Roadmaps.as_str().to_string()
}

fn default_graphs() -> String {
    ContentKind::Graphs.as_str().to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            author: None,
            description: None,
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            notes: default_notes(),
            projects: default_projects(),
            roadmaps: default_roadmaps(),
            graphs: default_graphs(),
        }
    }
}

impl ContentConfig {
    /// Directory holding content of the given kind.
    pub fn dir_for(&self, kind: ContentKind) -> PathBuf {
        let name = match kind {
            ContentKind::Notes => &self.notes,
            ContentKind::Projects => &self.projects,
            ContentKind::Roadmaps => &self.roadmaps,
            ContentKind::Graphs => &self.graphs,
        };
        self.root.join(name)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `FOLIO__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve a relative content root against the directory of the config file.
    pub fn relative_to(mut self, config_path: &Path) -> Self {
        if self.content.root.is_relative()
            && let Some(base) = config_path.parent()
        {
            self.content.root = base.join(&self.content.root);
        }
        self
    }

    /// Directory holding content of the given kind.
    pub fn content_dir(&self, kind: ContentKind) -> PathBuf {
        self.content.dir_for(kind)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        for kind in ContentKind::ALL {
            let dir = match kind {
                ContentKind::Notes => &self.content.notes,
                ContentKind::Projects => &self.content.projects,
                ContentKind::Roadmaps => &self.content.roadmaps,
                ContentKind::Graphs => &self.content.graphs,
            };
            if dir.is_empty() {
                return Err(CoreError::config(format!(
                    "content.{kind} cannot be empty"
                )));
            }
        }

        if !self.content.root.exists() {
            tracing::warn!(root = %self.content.root.display(), "content root does not exist yet");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
title = "Test Site"
author = "Someone"

[content]
root = "site-content"
notes = "posts"
graphs = "kg"
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Test Site");
        assert_eq!(config.site.author.as_deref(), Some("Someone"));
        assert_eq!(config.content.root, PathBuf::from("site-content"));
        assert_eq!(
            config.content_dir(ContentKind::Notes),
            PathBuf::from("site-content/posts")
        );
        assert_eq!(
            config.content_dir(ContentKind::Projects),
            PathBuf::from("site-content/projects")
        );
        assert_eq!(
            config.content_dir(ContentKind::Graphs),
            PathBuf::from("site-content/kg")
        );
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, "").expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Folio");
        assert_eq!(config.content.root, PathBuf::from("content"));
        assert_eq!(
            config.content_dir(ContentKind::Roadmaps),
            PathBuf::from("content/roadmaps")
        );
    }

    #[test]
    fn test_relative_root_resolution() {
        let config = Config::default().relative_to(Path::new("/srv/site/folio.toml"));
        assert_eq!(config.content.root, PathBuf::from("/srv/site/content"));

        let mut absolute = Config::default();
        absolute.content.root = PathBuf::from("/data/content");
        let absolute = absolute.relative_to(Path::new("/srv/site/folio.toml"));
        assert_eq!(absolute.content.root, PathBuf::from("/data/content"));
    }

    #[test]
    fn test_config_validation_empty_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, "[site]\ntitle = \"\"\n").expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_config_validation_empty_dir() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, "[content]\nnotes = \"\"\n").expect("write");

        let err = Config::load(&config_path).expect_err("empty dir rejected");
        assert!(err.to_string().contains("content.notes"));
    }

    #[test]
    fn test_load_with_env_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = Config::load_with_env(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(config.content.notes, "notes");
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/folio.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
