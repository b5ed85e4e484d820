//! Homepage data: counts of the bundled collections and footer socials.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tinyweb_types::{SiteCounts, Social};

#[derive(Error, Debug)]
pub enum HomeError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} is not a JSON array: {source}")]
    NotAnArray {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid site metadata in {path:?}: {source}")]
    SiteMeta {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SiteMeta {
    #[serde(default)]
    socials: Vec<Social>,
}

/// Bundled site collections, loaded once
#[derive(Debug, Clone, Default)]
pub struct SiteData {
    counts: SiteCounts,
    socials: Vec<Social>,
}

impl SiteData {
    /// Read the four collections and the optional `site/site.json`
    ///
    /// Layout under `data_dir`:
    /// `roadmaps.json`, `site/docs.json`, `site/projects.json`,
    /// `site/tools.json`, `site/site.json`.
    pub fn load(data_dir: &Path) -> Result<Self, HomeError> {
        let site_dir = data_dir.join("site");

        let counts = SiteCounts {
            roadmaps: collection_len(&data_dir.join("roadmaps.json"))?,
            docs: collection_len(&site_dir.join("docs.json"))?,
            projects: collection_len(&site_dir.join("projects.json"))?,
            tools: collection_len(&site_dir.join("tools.json"))?,
        };

        let meta_path = site_dir.join("site.json");
        let socials = if meta_path.exists() {
            let bytes = read(&meta_path)?;
            let meta: SiteMeta =
                serde_json::from_slice(&bytes).map_err(|source| HomeError::SiteMeta {
                    path: meta_path.clone(),
                    source,
                })?;
            meta.socials
        } else {
            tracing::debug!("No site metadata at {:?}", meta_path);
            Vec::new()
        };

        tracing::info!(
            roadmaps = counts.roadmaps,
            docs = counts.docs,
            projects = counts.projects,
            tools = counts.tools,
            "Loaded site data"
        );

        Ok(Self { counts, socials })
    }

    pub fn from_parts(counts: SiteCounts, socials: Vec<Social>) -> Self {
        Self { counts, socials }
    }

    pub fn counts(&self) -> SiteCounts {
        self.counts
    }

    pub fn socials(&self) -> &[Social] {
        &self.socials
    }
}

fn read(path: &Path) -> Result<Vec<u8>, HomeError> {
    std::fs::read(path).map_err(|source| HomeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Element count of a JSON array; the elements themselves are not inspected
fn collection_len(path: &Path) -> Result<usize, HomeError> {
    let bytes = read(path)?;
    let items: Vec<serde::de::IgnoredAny> =
        serde_json::from_slice(&bytes).map_err(|source| HomeError::NotAnArray {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(items.len())
}
