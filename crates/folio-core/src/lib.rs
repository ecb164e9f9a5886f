//! Folio Core Library
//!
//! Configuration, error handling, front-matter splitting, and the small date
//! and tag helpers shared by every content loader.

pub mod config;
pub mod date;
pub mod error;
pub mod frontmatter;
pub mod kind;
pub mod tags;

pub use config::Config;
pub use date::format_date;
pub use error::{CoreError, Result};
pub use frontmatter::{Metadata, split_front_matter};
pub use kind::ContentKind;
pub use tags::collect_tags;
