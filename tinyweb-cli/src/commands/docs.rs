//! Docs command implementation.

use super::load_config;
use crate::api;
use anyhow::{Context, Result};
use std::path::Path;
use tinyweb_core::{document_source, load_documents, DocsView};

/// Print the document index, grouped or filtered by `search`
pub async fn list_docs(config_path: &Path, search: Option<&str>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let source = document_source(&config).context("Failed to set up document source")?;
    let docs = load_documents(&source).await;

    let view = DocsView::for_query(&docs, search);

    if json {
        let data = match &view {
            DocsView::Grouped(groups) => api::DocsData {
                query: None,
                groups: Some(
                    groups
                        .iter()
                        .map(|group| api::DocsGroup {
                            category: group.category,
                            documents: group.documents.clone(),
                        })
                        .collect(),
                ),
                results: None,
            },
            DocsView::Results { term, matches } => api::DocsData {
                query: Some(term.as_str()),
                groups: None,
                results: Some(matches.clone()),
            },
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&api::envelope("docs.index", data))?
        );
        return Ok(());
    }

    match &view {
        DocsView::Grouped(groups) => {
            if groups.is_empty() {
                println!("No documentation available.");
            }
            for group in groups.iter() {
                println!("{}", group.category);
                for doc in &group.documents {
                    println!("  {} ({})", doc.title, doc.url());
                }
            }
        }
        DocsView::Results { matches, .. } => {
            if matches.is_empty() {
                println!("No results found.");
            }
            for doc in matches {
                println!("{} ({})", doc.title, doc.url());
            }
        }
    }

    Ok(())
}
