//! Folio Content Library
//!
//! Loads notes, projects, roadmaps and knowledge graphs from a content
//! directory into normalized, serializable records.
//!
//! # Modules
//!
//! - [`loader`] - Directory scanning and the [`ContentLoader`] trait
//! - [`posts`] - Notes (blog posts)
//! - [`projects`] - Project showcases
//! - [`roadmap`] - Roadmaps and the checkbox task-list parser
//! - [`graph`] - Knowledge graphs, graph block extraction and validation
//! - [`site`] - All four loaders behind one facade

pub mod error;
pub mod graph;
pub mod loader;
pub mod posts;
pub mod projects;
pub mod roadmap;
pub mod site;

pub use error::{ContentError, Result};
pub use graph::{Graph, GraphData, GraphError, GraphLoader, GraphMeta};
pub use loader::{ContentDir, ContentLoader, Entry};
pub use posts::{Post, PostLoader, PostMeta};
pub use projects::{Project, ProjectLoader, ProjectMeta, TechItem};
pub use roadmap::{
    ItemStatus, Priority, Progress, Roadmap, RoadmapItem, RoadmapLoader, RoadmapMeta,
    RoadmapStatus, calculate_progress, parse_items,
};
pub use site::{CheckReport, Finding, Site};
