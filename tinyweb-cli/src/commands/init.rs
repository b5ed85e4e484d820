//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../tinyweb.yml.example");

/// Initialize a new tinyweb site
pub fn init_site(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_if_missing(&root.join("tinyweb.yml"), DEFAULT_CONFIG)?;
    scaffold_data(&root.join("data"))?;
    scaffold_projects(&root.join("content").join("projects"))?;

    println!("✓ tinyweb initialized in {:?}", root);
    println!("  - Edit tinyweb.yml to customize site metadata");
    println!("  - Add projects to content/projects/");
    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("{:?} already exists", path);
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))?;
    println!("Created {:?}", path);
    Ok(())
}

fn scaffold_data(data_dir: &Path) -> Result<()> {
    let site_dir = data_dir.join("site");

    write_if_missing(&data_dir.join("roadmaps.json"), "[]\n")?;
    write_if_missing(&site_dir.join("docs.json"), SAMPLE_DOCS)?;
    write_if_missing(&site_dir.join("projects.json"), "[]\n")?;
    write_if_missing(&site_dir.join("tools.json"), "[]\n")?;
    write_if_missing(&site_dir.join("site.json"), SAMPLE_SITE)?;
    Ok(())
}

fn scaffold_projects(projects_dir: &Path) -> Result<()> {
    write_if_missing(&projects_dir.join("welcome.mdx"), SAMPLE_PROJECT)
}

const SAMPLE_DOCS: &str = r#"[
  { "slug": "getting-started", "title": "Getting Started", "category": "Guides" }
]
"#;

const SAMPLE_SITE: &str = r#"{
  "socials": [
    { "name": "github", "link": "https://github.com/" }
  ]
}
"#;

const SAMPLE_PROJECT: &str = r#"---
title: Welcome
description: Your first project page
---
## Welcome

Each file in content/projects/ becomes a project page.

Run `tinyweb serve` and open /projects to see it listed.
"#;
