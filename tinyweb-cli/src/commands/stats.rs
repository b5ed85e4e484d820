//! Stats command implementation.

use super::load_config;
use crate::api;
use anyhow::{Context, Result};
use std::path::Path;
use tinyweb_core::SiteData;

/// Print the four homepage counts
pub fn show_stats(config_path: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let data = SiteData::load(&config.data_dir()).context("Failed to load site data")?;
    let counts = data.counts();

    if json {
        let payload = api::envelope("site.stats", counts);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Roadmaps:      {}", counts.roadmaps);
    println!("Documentation: {}", counts.docs);
    println!("Projects:      {}", counts.projects);
    println!("Tools:         {}", counts.tools);
    Ok(())
}
