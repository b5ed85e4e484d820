//! Projects command implementation.

use super::load_config;
use crate::api;
use anyhow::Result;
use std::path::Path;
use tinyweb_core::{load_projects, ProjectListing};

pub fn list_projects(config_path: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let listing = load_projects(&config.projects_dir());

    if json {
        let payload = api::envelope("projects.list", api::ProjectsData::new(&listing));
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    match &listing {
        ProjectListing::Missing => println!("No projects found."),
        ProjectListing::Found(projects) if projects.is_empty() => {
            println!("No projects available.")
        }
        ProjectListing::Found(projects) => {
            for project in projects {
                println!("{} ({})", project.title, project.url());
                println!("  {}", project.description);
            }
        }
    }

    Ok(())
}
