//! # tinyweb-core
//!
//! Core library for the tinyweb content site.
//!
//! Three independent read paths live here: the documentation index
//! ([`docs`]), the homepage aggregates ([`home`]) and the project metadata
//! extractor ([`projects`]). Configuration, front-matter parsing and
//! markdown rendering support them.

pub mod config;
pub mod docs;
pub mod frontmatter;
pub mod home;
pub mod markdown;
pub mod projects;
pub mod slug;

pub use config::Config;
pub use docs::{
    group_by_category, load_documents, search, CategoryGroup, DocsError, DocsView,
    DocumentSource, GroupedDocuments,
};
pub use frontmatter::Frontmatter;
pub use home::{HomeError, SiteData};
pub use markdown::{MarkdownProcessor, RenderedMarkdown};
pub use projects::{
    extract_project, load_project, load_project_pages, load_projects, ProjectListing, ProjectPage,
    NO_DESCRIPTION,
};
pub use slug::slugify;
pub use tinyweb_types::{DocumentDescriptor, ProjectSummary, SiteCounts, Social};

use std::time::Duration;

/// Document source selected by the configuration
pub fn document_source(config: &Config) -> Result<DocumentSource, DocsError> {
    match &config.docs.endpoint {
        Some(url) => {
            DocumentSource::endpoint(url.clone(), Duration::from_secs(config.docs.timeout_secs))
        }
        None => Ok(DocumentSource::file(config.docs_file())),
    }
}
