//! Shared types for tinyweb
//!
//! This crate provides the read-only records that flow between the
//! content loaders in `tinyweb-core`, the templates in `tinyweb-render`
//! and the JSON surfaces of the CLI and server.

use serde::{Deserialize, Serialize};

/// A documentation entry as supplied by the document source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    /// URL-safe identifier, unique across the list
    pub slug: String,
    pub title: String,
    /// Free-text grouping label
    pub category: String,
}

impl DocumentDescriptor {
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            category: category.into(),
        }
    }

    /// Link to the document's detail page
    pub fn url(&self) -> String {
        format!("/docs/{}", self.slug)
    }
}

/// Listing entry derived from a project content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// File name without its extension
    pub slug: String,
    pub title: String,
    pub description: String,
}

impl ProjectSummary {
    /// Link to the project's detail page
    pub fn url(&self) -> String {
        format!("/projects/{}", self.slug)
    }
}

/// Sizes of the four bundled site collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteCounts {
    pub roadmaps: usize,
    pub docs: usize,
    pub projects: usize,
    pub tools: usize,
}

/// A social profile link shown in the site footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    pub name: String,
    pub link: String,
}
