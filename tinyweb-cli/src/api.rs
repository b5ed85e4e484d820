//! Shared JSON payloads for `--json` output and the `/api/*` routes.

use serde::Serialize;
use tinyweb_core::{DocumentDescriptor, ProjectListing, ProjectSummary};

pub const SCHEMA_VERSION: &str = "2026-10-v1";

/// Standard envelope for machine-consumable responses.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub schema_version: &'static str,
    pub kind: &'static str,
    pub data: T,
}

pub fn envelope<T>(kind: &'static str, data: T) -> Envelope<T> {
    Envelope {
        schema_version: SCHEMA_VERSION,
        kind,
        data,
    }
}

#[derive(Serialize)]
pub struct ProjectsData<'a> {
    /// True when the projects directory does not exist
    pub missing: bool,
    pub projects: &'a [ProjectSummary],
}

impl<'a> ProjectsData<'a> {
    pub fn new(listing: &'a ProjectListing) -> Self {
        Self {
            missing: matches!(listing, ProjectListing::Missing),
            projects: listing.projects(),
        }
    }
}

#[derive(Serialize)]
pub struct DocsGroup<'a> {
    pub category: &'a str,
    pub documents: Vec<&'a DocumentDescriptor>,
}

/// `docs` command output: either `groups` or `results` is set
#[derive(Serialize)]
pub struct DocsData<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<DocsGroup<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<&'a DocumentDescriptor>>,
}
