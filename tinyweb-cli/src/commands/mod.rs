//! CLI command implementations.

pub mod build;
pub mod config;
pub mod docs;
pub mod init;
pub mod projects;
pub mod serve;
pub mod stats;

pub use build::build_site;
pub use config::config_get;
pub use docs::list_docs;
pub use init::init_site;
pub use projects::list_projects;
pub use serve::serve;
pub use stats::show_stats;

use anyhow::{Context, Result};
use chrono::Datelike;
use std::path::Path;
use tinyweb_core::Config;
use tinyweb_render::Layout;

pub(crate) fn load_config(config_path: &Path) -> Result<Config> {
    tracing::debug!("Loading config from {:?}", config_path);
    Config::from_file(config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))
}

pub(crate) fn page_layout(config: &Config) -> Layout {
    Layout::from_config(config, chrono::Utc::now().year())
}
