//! Build command implementation.

use super::{load_config, page_layout};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tinyweb_core::{
    document_source, load_documents, load_project_pages, Config, DocsView, ProjectListing,
    SiteData,
};
use tinyweb_render::{
    render_page, DocsTemplate, HomeTemplate, Layout, NotFoundTemplate, ProjectTemplate,
    ProjectsTemplate,
};
use walkdir::WalkDir;

/// What a build wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub projects: usize,
    pub docs: usize,
}

/// Render every page into the output directory
pub async fn build_site(config_path: &Path) -> Result<BuildSummary> {
    let config = load_config(config_path)?;
    tracing::info!("Building site: {}", config.site.title);

    let data = SiteData::load(&config.data_dir()).context("Failed to load site data")?;
    let layout = page_layout(&config);

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    let mut summary = BuildSummary::default();

    // Homepage
    let home = HomeTemplate::new(layout.clone(), config.site.tagline.clone(), &data);
    write_page(&output_dir.join("index.html"), &render_page(&home)?)?;
    summary.pages += 1;

    // Documentation index; the grouped view with client-side search
    let source = document_source(&config).context("Failed to set up document source")?;
    let docs = load_documents(&source).await;
    let view = DocsView::for_query(&docs, None);
    let docs_page = DocsTemplate::new(layout.clone(), &docs, &view);
    write_page(&output_dir.join("docs/index.html"), &render_page(&docs_page)?)?;
    write_page(
        &output_dir.join("api/docs.json"),
        &serde_json::to_string_pretty(&docs)?,
    )?;
    summary.pages += 1;
    summary.docs = docs.len();

    summary.projects = render_projects(&config, &layout, &output_dir)?;
    summary.pages += summary.projects + 1;

    write_page(
        &output_dir.join("404.html"),
        &render_page(&NotFoundTemplate { layout })?,
    )?;
    summary.pages += 1;

    if let Some(static_dir) = config.static_dir() {
        if static_dir.is_dir() {
            copy_dir(&static_dir, &output_dir)?;
            tracing::info!("Copied assets from {:?}", static_dir);
        } else {
            tracing::warn!("Static directory {:?} does not exist", static_dir);
        }
    }

    tracing::info!("✓ Built {} pages", summary.pages);
    tracing::info!("✓ Output written to {:?}", output_dir);

    Ok(summary)
}

/// Projects index plus one page per project; returns the project page count
fn render_projects(config: &Config, layout: &Layout, output_dir: &Path) -> Result<usize> {
    let pages = load_project_pages(&config.projects_dir());

    let listing = match &pages {
        Some(pages) => ProjectListing::Found(pages.iter().map(|p| p.summary.clone()).collect()),
        None => ProjectListing::Missing,
    };
    let index = ProjectsTemplate::new(layout.clone(), &listing);
    write_page(&output_dir.join("projects/index.html"), &render_page(&index)?)?;

    let pages = pages.unwrap_or_default();
    for page in &pages {
        let template = ProjectTemplate::new(layout.clone(), page);
        let path = output_dir
            .join("projects")
            .join(&page.summary.slug)
            .join("index.html");
        write_page(&path, &render_page(&template)?)?;
    }

    tracing::info!("Rendered {} project pages", pages.len());
    Ok(pages.len())
}

fn write_page(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))
}

fn copy_dir(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)
            .with_context(|| format!("Failed to copy {:?} to {:?}", entry.path(), target))?;
    }
    Ok(())
}
