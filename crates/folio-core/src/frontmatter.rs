//! Front-matter splitting for content files.
//!
//! A document may open with a metadata block delimited by `---` (YAML) or
//! `+++` (TOML) lines. Both formats end up in the same [`Metadata`] mapping so
//! loaders never care which one an author picked.

use std::path::Path;

use serde_yaml::{Mapping, Value};
use thiserror::Error;
use tracing::warn;

use crate::error::{CoreError, Result};

/// Key-value metadata from a front-matter block.
pub type Metadata = Mapping;

/// Delimiter types for front-matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML front-matter delimited by `---`.
    Yaml,
    /// TOML front-matter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Locate the front-matter block without parsing it.
///
/// The opening delimiter must be the first line of the document and the
/// closing delimiter a line of its own. Returns the format, the raw block and
/// the body that follows the closing line.
pub fn split_block(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let (first, rest) = content.split_once('\n')?;

    let format = match first.trim_end() {
        "---" => FrontmatterFormat::Yaml,
        "+++" => FrontmatterFormat::Toml,
        _ => return None,
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == format.delimiter() {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((format, block, body));
        }
        offset += line.len();
    }

    None
}

/// Split a document into metadata and body.
///
/// Absent, unterminated or unparseable blocks yield empty metadata and the
/// original text as the body. Unparseable blocks are logged.
pub fn split_front_matter(content: &str) -> (Metadata, String) {
    let Some((format, block, body)) = split_block(content) else {
        return (Metadata::new(), content.to_string());
    };

    match parse_block(format, block) {
        Ok(metadata) => (metadata, body.to_string()),
        Err(e) => {
            warn!(error = %e, "ignoring malformed front-matter");
            (Metadata::new(), content.to_string())
        }
    }
}

/// Strict variant of [`split_front_matter`] that reports malformed blocks.
pub fn parse_front_matter(content: &str, path: &Path) -> Result<(Metadata, String)> {
    let Some((format, block, body)) = split_block(content) else {
        return Ok((Metadata::new(), content.to_string()));
    };

    let metadata = parse_block(format, block).map_err(|e| e.at(path))?;
    Ok((metadata, body.to_string()))
}

/// Decode a metadata mapping into a typed front-matter struct.
pub fn decode<T>(metadata: Metadata, path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_yaml::from_value(Value::Mapping(metadata)).map_err(|source| CoreError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Why a block could not become metadata, before a path is known.
#[derive(Debug, Error)]
enum BlockError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("front-matter is not a key-value mapping")]
    NotMapping,
}

impl BlockError {
    fn at(self, path: &Path) -> CoreError {
        let path = path.to_path_buf();
        match self {
            Self::Yaml(source) => CoreError::Yaml { path, source },
            Self::Toml(source) => CoreError::Toml { path, source },
            Self::NotMapping => {
                CoreError::frontmatter(path, "front-matter is not a key-value mapping")
            }
        }
    }
}

fn parse_block(
    format: FrontmatterFormat,
    block: &str,
) -> std::result::Result<Metadata, BlockError> {
    match format {
        FrontmatterFormat::Yaml => match serde_yaml::from_str::<Value>(block)? {
            Value::Mapping(mapping) => Ok(mapping),
            Value::Null => Ok(Metadata::new()),
            _ => Err(BlockError::NotMapping),
        },
        FrontmatterFormat::Toml => {
            let table: toml::Table = toml::from_str(block)?;
            Ok(table
                .into_iter()
                .map(|(key, value)| (Value::String(key), toml_to_yaml(value)))
                .collect())
        }
    }
}

fn toml_to_yaml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        // Datetimes keep their textual form; the date helpers recognise it.
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(toml_to_yaml).collect()),
        toml::Value::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(key, value)| (Value::String(key), toml_to_yaml(value)))
                .collect(),
        ),
    }
}

/// Lenient field deserializers for hand-written front-matter.
///
/// Authors write `title: 2024` or `tags: rust` as often as the canonical
/// forms, so these accept any scalar where a string is expected and a lone
/// scalar where a list is expected. Anything else falls back to empty.
pub mod de {
    use serde::{Deserialize, Deserializer};
    use serde_yaml::Value;

    /// Any scalar as a string. Null, sequences and mappings become `None`.
    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(scalar_to_string(&value))
    }

    /// A list of scalars, or a single scalar as a one-element list.
    pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Sequence(items) => items.iter().filter_map(scalar_to_string).collect(),
            other => scalar_to_string(&other).into_iter().collect(),
        })
    }

    /// String form of a scalar value.
    pub fn scalar_to_string(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Tagged(tagged) => scalar_to_string(&tagged.value),
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }
}
