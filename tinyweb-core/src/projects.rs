//! Project listing: title/description extraction from content files.
//!
//! Every file is resolved in two stages. Structured fields come from the
//! front-matter block ([`Metadata`]); independently, candidates are
//! derived from the body ([`BodyCandidates`]). [`resolve`] merges them with
//! the front-matter taking precedence and fixed fallbacks last. Nothing in
//! here fails on malformed content.

use crate::frontmatter::{parse_frontmatter, split_frontmatter};
use crate::markdown::{MarkdownProcessor, RenderedMarkdown};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tinyweb_types::ProjectSummary;
use walkdir::WalkDir;

/// Description used when neither front-matter nor body supplies one
pub const NO_DESCRIPTION: &str = "No description available.";

/// Marker of the heading that titles a project body
const TITLE_MARKER: &str = "##";

/// Structured fields from the front-matter block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Title/description guesses taken from the body text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyCandidates {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl BodyCandidates {
    /// Scan non-blank lines for the first `##` heading and the first
    /// non-heading line after it
    pub fn from_body(body: &str) -> Self {
        let lines: Vec<&str> = body.lines().filter(|line| !line.trim().is_empty()).collect();

        let Some(h) = lines.iter().position(|line| line.starts_with(TITLE_MARKER)) else {
            return Self::default();
        };

        let title = lines[h][TITLE_MARKER.len()..].trim().to_string();
        let description = lines[h + 1..]
            .iter()
            .find(|line| !line.starts_with('#'))
            .map(|line| line.trim().to_string());

        Self {
            title: Some(title),
            description,
        }
    }
}

/// A content file split into its two resolution inputs
#[derive(Debug, Clone)]
pub struct ParsedProject<'a> {
    pub metadata: Metadata,
    pub body: &'a str,
}

/// Split a file into metadata and body; unreadable YAML counts as no metadata
pub fn parse_project<'a>(file_name: &str, content: &'a str) -> ParsedProject<'a> {
    match parse_frontmatter(content) {
        Ok((fm, body)) => ParsedProject {
            metadata: Metadata {
                title: fm.title,
                description: fm.description,
            },
            body,
        },
        Err(e) => {
            tracing::warn!("Ignoring front-matter of {}: {}", file_name, e);
            ParsedProject {
                metadata: Metadata::default(),
                body: split_frontmatter(content).body,
            }
        }
    }
}

/// Merge structured fields over body candidates over fixed fallbacks
pub fn resolve(slug: &str, metadata: Metadata, candidates: BodyCandidates) -> ProjectSummary {
    ProjectSummary {
        slug: slug.to_string(),
        title: metadata
            .title
            .or(candidates.title)
            .unwrap_or_else(|| slug.to_string()),
        description: metadata
            .description
            .or(candidates.description)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
    }
}

/// File name with its extension removed
pub fn file_slug(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

/// Extract the listing entry for one content file
///
/// # Example
///
/// ```
/// use tinyweb_core::projects::extract_project;
///
/// let summary = extract_project("counter.mdx", "## Counter\n\nClick to count.\n");
/// assert_eq!(summary.slug, "counter");
/// assert_eq!(summary.title, "Counter");
/// assert_eq!(summary.description, "Click to count.");
/// ```
pub fn extract_project(file_name: &str, content: &str) -> ProjectSummary {
    let parsed = parse_project(file_name, content);
    let candidates = BodyCandidates::from_body(parsed.body);
    resolve(&file_slug(file_name), parsed.metadata, candidates)
}

/// Result of scanning the projects directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectListing {
    /// The directory does not exist
    Missing,
    /// Entries in file-name order; may be empty
    Found(Vec<ProjectSummary>),
}

impl ProjectListing {
    pub fn projects(&self) -> &[ProjectSummary] {
        match self {
            Self::Missing => &[],
            Self::Found(projects) => projects,
        }
    }
}

/// Full detail of a single project
#[derive(Debug, Clone)]
pub struct ProjectPage {
    pub summary: ProjectSummary,
    pub content: RenderedMarkdown,
}

struct ProjectFile {
    path: PathBuf,
    file_name: String,
    content: String,
}

/// Read every regular, non-hidden file directly inside `dir`
///
/// Duplicate slugs keep the first file by name.
fn read_project_files(dir: &Path) -> Option<Vec<ProjectFile>> {
    if !dir.is_dir() {
        return None;
    }

    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') {
            tracing::debug!("Skipping hidden file {}", file_name);
            continue;
        }

        let slug = file_slug(&file_name);
        if !seen.insert(slug.clone()) {
            tracing::warn!(
                "Duplicate project slug '{}' from {}; keeping the first file",
                slug,
                file_name
            );
            continue;
        }

        match std::fs::read(entry.path()) {
            Ok(bytes) => files.push(ProjectFile {
                path: entry.path().to_path_buf(),
                file_name,
                content: String::from_utf8_lossy(&bytes).into_owned(),
            }),
            Err(e) => {
                seen.remove(&slug);
                tracing::warn!("Failed to read {:?}: {}", entry.path(), e);
            }
        }
    }

    Some(files)
}

/// Scan the projects directory and extract every entry
pub fn load_projects(dir: &Path) -> ProjectListing {
    let Some(files) = read_project_files(dir) else {
        tracing::debug!("Projects directory {:?} does not exist", dir);
        return ProjectListing::Missing;
    };

    let projects: Vec<ProjectSummary> = files
        .iter()
        .map(|file| extract_project(&file.file_name, &file.content))
        .collect();

    tracing::debug!("Extracted {} projects from {:?}", projects.len(), dir);
    ProjectListing::Found(projects)
}

/// Look up one project by slug and render its body
pub fn load_project(dir: &Path, slug: &str) -> Option<ProjectPage> {
    let file = read_project_files(dir)?
        .into_iter()
        .find(|file| file_slug(&file.file_name) == slug)?;

    Some(render_project(&MarkdownProcessor::new(), &file))
}

/// Render every project from a single scan of the directory
///
/// `None` when the directory does not exist. Pages come in listing order.
pub fn load_project_pages(dir: &Path) -> Option<Vec<ProjectPage>> {
    let files = read_project_files(dir)?;
    let processor = MarkdownProcessor::new();
    Some(
        files
            .iter()
            .map(|file| render_project(&processor, file))
            .collect(),
    )
}

fn render_project(processor: &MarkdownProcessor, file: &ProjectFile) -> ProjectPage {
    let slug = file_slug(&file.file_name);
    tracing::debug!("Rendering project {} from {:?}", slug, file.path);

    let parsed = parse_project(&file.file_name, &file.content);
    let content = processor.convert(parsed.body);
    let summary = resolve(&slug, parsed.metadata, BodyCandidates::from_body(parsed.body));

    ProjectPage { summary, content }
}
