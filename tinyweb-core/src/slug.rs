//! Anchor slugs for headings and category sections.
//!
//! Content slugs come straight from file names (see `projects::file_slug`);
//! this module only builds in-page fragment ids.

use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

static HYPHEN_RUNS: OnceLock<Regex> = OnceLock::new();

/// Convert a label to a fragment-safe slug
///
/// Lowercases, turns whitespace and underscores into hyphens, drops
/// punctuation, keeps unicode letters and collapses hyphen runs.
///
/// # Examples
///
/// ```
/// use tinyweb_core::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("HTML & CSS"), "html-css");
/// assert_eq!(slugify("Node.js Tips"), "nodejs-tips");
/// ```
pub fn slugify(input: &str) -> String {
    let kept: String = input
        .to_lowercase()
        .graphemes(true)
        .filter_map(|g| {
            let c = g.chars().next()?;
            if c.is_whitespace() || c == '_' || c == '-' {
                Some("-")
            } else if c.is_alphanumeric() {
                Some(g)
            } else {
                None
            }
        })
        .collect();

    let re = HYPHEN_RUNS.get_or_init(|| Regex::new(r"-+").expect("hyphen pattern is valid"));
    re.replace_all(&kept, "-").trim_matches('-').to_string()
}
