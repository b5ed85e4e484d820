//! Frontmatter parsing from markdown files.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Metadata block at the top of a content file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Frontmatter {
    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "scalar_text")]
    pub description: Option<String>,
}

/// A content file split at its metadata fence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// YAML between the `---` fences, `None` when the file has no block
    pub yaml: Option<&'a str>,
    pub body: &'a str,
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| {
        Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n(.*))?\z")
            .expect("frontmatter pattern is valid")
    })
}

/// Separate the metadata block from the body without interpreting it
pub fn split_frontmatter(content: &str) -> Split<'_> {
    match frontmatter_regex().captures(content) {
        Some(captures) => Split {
            yaml: Some(captures.get(1).map_or("", |m| m.as_str())),
            body: captures.get(2).map_or("", |m| m.as_str()),
        },
        None => Split {
            yaml: None,
            body: content,
        },
    }
}

/// Parse frontmatter from markdown content
///
/// Returns a tuple of (frontmatter, markdown_body).
/// If no frontmatter is present, returns default frontmatter with the full content as body.
///
/// # Example
///
/// ```
/// use tinyweb_core::frontmatter::parse_frontmatter;
///
/// let content = "---\ntitle: Todo App\n---\n## Todo\n";
///
/// let (fm, body) = parse_frontmatter(content).unwrap();
/// assert_eq!(fm.title.as_deref(), Some("Todo App"));
/// assert!(body.starts_with("## Todo"));
/// ```
pub fn parse_frontmatter(content: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let split = split_frontmatter(content);
    let frontmatter = match split.yaml {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(yaml)?,
        _ => Frontmatter::default(),
    };
    Ok((frontmatter, split.body))
}

/// Accept strings and numbers; blank strings and every other YAML kind count as absent
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_yaml::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
