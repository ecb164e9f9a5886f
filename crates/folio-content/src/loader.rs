//! Directory scanning shared by every content loader.
//!
//! Each kind of content lives in one flat directory. A file's slug is its
//! name without extension; lookups compare slugs exactly, so `Rust.md` is
//! never served for `rust` even on case-insensitive file systems.

use std::{
    fs,
    path::{Path, PathBuf},
};

use folio_core::{ContentKind, Metadata, frontmatter, split_front_matter};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::{ContentError, Result};

/// Common operations of the per-kind loaders.
pub trait ContentLoader {
    /// Listing entry.
    type Summary: Serialize;

    /// Full record for a single slug.
    type Record: Serialize;

    /// Kind of content this loader serves.
    fn kind(&self) -> ContentKind;

    /// Directory this loader reads from.
    fn dir(&self) -> &ContentDir;

    /// All summaries, newest first.
    fn list_all(&self) -> Result<Vec<Self::Summary>>;

    /// Full record for `slug`, or `None` when no such file exists.
    fn get(&self, slug: &str) -> Result<Option<Self::Record>>;

    /// Every servable slug, without parsing bodies.
    fn slugs(&self) -> Result<Vec<String>> {
        Ok(self
            .dir()
            .entries()?
            .into_iter()
            .map(|entry| entry.slug)
            .collect())
    }
}

/// A content file found by [`ContentDir::entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// File name without extension.
    pub slug: String,

    /// Full path to the file.
    pub path: PathBuf,

    /// Matched extension.
    pub extension: &'static str,
}

/// A flat directory of content files with recognized extensions.
#[derive(Debug, Clone)]
pub struct ContentDir {
    dir: PathBuf,
    extensions: &'static [&'static str],
}

impl ContentDir {
    /// Create a content directory recognizing the given extensions.
    ///
    /// Earlier extensions win when two files share a slug.
    pub fn new(dir: impl Into<PathBuf>, extensions: &'static [&'static str]) -> Self {
        Self {
            dir: dir.into(),
            extensions,
        }
    }

    /// Content directory for a kind, using that kind's extensions.
    pub fn for_kind(dir: impl Into<PathBuf>, kind: ContentKind) -> Self {
        Self::new(dir, kind.extensions())
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// All content files, one per slug, ordered by slug.
    ///
    /// A missing directory yields no entries.
    pub fn entries(&self) -> Result<Vec<Entry>> {
        if !self.dir.is_dir() {
            debug!(dir = %self.dir.display(), "content directory missing, nothing to load");
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let read_dir = fs::read_dir(&self.dir).map_err(|e| ContentError::io(&self.dir, e))?;

        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|e| ContentError::io(&self.dir, e))?;
            let path = dir_entry.path();

            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                warn!(path = %path.display(), "skipping file with non UTF-8 name");
                continue;
            };

            if let Some((slug, extension)) = self.split_file_name(file_name) {
                entries.push(Entry {
                    slug: slug.to_string(),
                    path: path.clone(),
                    extension,
                });
            }
        }

        entries.sort_by(|a, b| {
            a.slug
                .cmp(&b.slug)
                .then_with(|| self.rank(a.extension).cmp(&self.rank(b.extension)))
        });
        entries.dedup_by(|later, earlier| later.slug == earlier.slug);

        Ok(entries)
    }

    /// Find the file serving `slug`, matching the name exactly.
    pub fn find(&self, slug: &str) -> Result<Option<Entry>> {
        if !is_valid_slug(slug) {
            return Ok(None);
        }

        Ok(self.entries()?.into_iter().find(|entry| entry.slug == slug))
    }

    /// Read a content file to a string.
    pub fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| ContentError::io(path, e))
    }

    /// Read a file and split its front-matter.
    pub fn load_document(&self, entry: &Entry) -> Result<Document> {
        debug!(path = %entry.path.display(), "parsing file");

        let raw = self.read(&entry.path)?;
        let (metadata, body) = split_front_matter(&raw);

        Ok(Document {
            slug: entry.slug.clone(),
            path: entry.path.clone(),
            metadata,
            body,
        })
    }

    fn split_file_name<'a>(&self, file_name: &'a str) -> Option<(&'a str, &'static str)> {
        self.extensions.iter().find_map(|ext| {
            let slug = file_name.strip_suffix(ext)?.strip_suffix('.')?;
            (!slug.is_empty()).then_some((slug, *ext))
        })
    }

    fn rank(&self, extension: &str) -> usize {
        self.extensions
            .iter()
            .position(|ext| *ext == extension)
            .unwrap_or(usize::MAX)
    }
}

/// A content file split into metadata and body.
#[derive(Debug, Clone)]
pub struct Document {
    pub slug: String,
    pub path: PathBuf,
    pub metadata: Metadata,
    pub body: String,
}

impl Document {
    /// Decode the metadata into a typed front-matter struct.
    ///
    /// When the mapping as a whole does not decode, each key is tried on its
    /// own and the keys that fail are dropped with a warning, so one stray
    /// value never hides the rest of the record.
    pub fn front_matter<T>(&self) -> T
    where
        T: DeserializeOwned + Default,
    {
        match frontmatter::decode(self.metadata.clone(), &self.path) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "unusable front-matter, dropping bad keys"
                );
                let usable: Metadata = self
                    .metadata
                    .iter()
                    .filter(|(key, value)| {
                        let single = Metadata::from_iter([((*key).clone(), (*value).clone())]);
                        let fits = frontmatter::decode::<T>(single, &self.path).is_ok();
                        if !fits {
                            warn!(path = %self.path.display(), ?key, "ignoring front-matter key");
                        }
                        fits
                    })
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                frontmatter::decode(usable, &self.path).unwrap_or_default()
            }
        }
    }
}

/// First non-empty candidate, or the slug.
pub(crate) fn display_name(candidates: &[Option<&String>], slug: &str) -> String {
    candidates
        .iter()
        .flatten()
        .find(|name| !name.is_empty())
        .map_or_else(|| slug.to_string(), |name| name.to_string())
}

/// Sort newest first by normalized date string. Ties keep their order.
pub(crate) fn sort_by_date_desc<T>(items: &mut [T], date: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| date(b).cmp(date(a)));
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug != "." && slug != ".." && !slug.contains(['/', '\\'])
}
