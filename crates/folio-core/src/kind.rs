//! Content kinds served by the site.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The four kinds of content, one directory each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Blog posts (`notes/*.md`).
    Notes,
    /// Project showcases (`projects/*.md`).
    Projects,
    /// Roadmaps with task lists (`roadmaps/*.md`).
    Roadmaps,
    /// Knowledge graphs (`graphs/*.md` or `graphs/*.json`).
    Graphs,
}

impl ContentKind {
    /// Every kind, in display order.
    pub const ALL: [ContentKind; 4] = [Self::Notes, Self::Projects, Self::Roadmaps, Self::Graphs];

    /// Lowercase name, also the default directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Projects => "projects",
            Self::Roadmaps => "roadmaps",
            Self::Graphs => "graphs",
        }
    }

    /// File extensions recognized for this kind, in lookup priority order.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Graphs => &["md", "json"],
            _ => &["md"],
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "notes" | "note" | "posts" | "post" => Ok(Self::Notes),
            "projects" | "project" => Ok(Self::Projects),
            "roadmaps" | "roadmap" => Ok(Self::Roadmaps),
            "graphs" | "graph" => Ok(Self::Graphs),
            other => Err(format!(
                "unknown content kind '{other}' (expected notes, projects, roadmaps or graphs)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("notes".parse::<ContentKind>(), Ok(ContentKind::Notes));
        assert_eq!("Post".parse::<ContentKind>(), Ok(ContentKind::Notes));
        assert_eq!("roadmap".parse::<ContentKind>(), Ok(ContentKind::Roadmaps));
        assert!("videos".parse::<ContentKind>().is_err());
    }

    #[test]
    fn test_extensions() {
        assert_eq!(ContentKind::Notes.extensions(), &["md"]);
        assert_eq!(ContentKind::Graphs.extensions(), &["md", "json"]);
    }

    #[test]
    fn test_display_round_trips() {
        for kind in ContentKind::ALL {
            assert_eq!(kind.to_string().parse::<ContentKind>(), Ok(kind));
        }
    }
}
