//! Documentation index: retrieval, category grouping and title search.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tinyweb_types::DocumentDescriptor;

#[derive(Error, Debug)]
pub enum DocsError {
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid document list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the document list is retrieved from
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// `GET` returning a JSON array of descriptors
    Endpoint { url: String, client: reqwest::Client },
    /// JSON file with the same array
    File(PathBuf),
}

impl DocumentSource {
    pub fn endpoint(url: impl Into<String>, timeout: Duration) -> Result<Self, DocsError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| DocsError::Http {
                url: url.clone(),
                source,
            })?;
        Ok(Self::Endpoint { url, client })
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Single retrieval of the full list
    pub async fn fetch(&self) -> Result<Vec<DocumentDescriptor>, DocsError> {
        match self {
            Self::Endpoint { url, client } => {
                let http_err = |source| DocsError::Http {
                    url: url.clone(),
                    source,
                };
                client
                    .get(url)
                    .send()
                    .await
                    .and_then(|resp| resp.error_for_status())
                    .map_err(http_err)?
                    .json::<Vec<DocumentDescriptor>>()
                    .await
                    .map_err(http_err)
            }
            Self::File(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|source| DocsError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(serde_json::from_slice(&bytes)?)
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Endpoint { url, .. } => url.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Fetch the list, degrading to an empty one on any failure
pub async fn load_documents(source: &DocumentSource) -> Vec<DocumentDescriptor> {
    match source.fetch().await {
        Ok(docs) => {
            tracing::debug!("Fetched {} documents from {}", docs.len(), source.describe());
            docs
        }
        Err(e) => {
            tracing::error!("Failed to fetch docs: {}", e);
            Vec::new()
        }
    }
}

/// Documents partitioned by category, categories in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedDocuments<'a> {
    groups: Vec<CategoryGroup<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub documents: Vec<&'a DocumentDescriptor>,
}

impl<'a> GroupedDocuments<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &CategoryGroup<'a>> {
        self.groups.iter()
    }

    pub fn categories(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.iter().map(|g| g.category)
    }

    pub fn get(&self, category: &str) -> Option<&[&'a DocumentDescriptor]> {
        self.groups
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.documents.as_slice())
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for GroupedDocuments<'a> {
    type Item = CategoryGroup<'a>;
    type IntoIter = std::vec::IntoIter<CategoryGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Single pass; no sorting beyond input order
pub fn group_by_category(docs: &[DocumentDescriptor]) -> GroupedDocuments<'_> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for doc in docs {
        let idx = *positions.entry(doc.category.as_str()).or_insert_with(|| {
            groups.push(CategoryGroup {
                category: doc.category.as_str(),
                documents: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].documents.push(doc);
    }

    GroupedDocuments { groups }
}

/// Case-insensitive substring match of `term` against titles
pub fn search<'a>(docs: &'a [DocumentDescriptor], term: &str) -> Vec<&'a DocumentDescriptor> {
    let needle = term.to_lowercase();
    docs.iter()
        .filter(|doc| doc.title.to_lowercase().contains(&needle))
        .collect()
}

/// What the docs page shows for a given search box value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocsView<'a> {
    Grouped(GroupedDocuments<'a>),
    Results {
        term: String,
        matches: Vec<&'a DocumentDescriptor>,
    },
}

impl<'a> DocsView<'a> {
    /// An empty term shows the grouped view; it is never run as a filter
    pub fn for_query(docs: &'a [DocumentDescriptor], term: Option<&str>) -> Self {
        match term {
            None | Some("") => Self::Grouped(group_by_category(docs)),
            Some(term) => Self::Results {
                term: term.to_string(),
                matches: search(docs, term),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn sample() -> Vec<DocumentDescriptor> {
        vec![
            DocumentDescriptor::new("flexbox", "Flexbox Guide", "CSS"),
            DocumentDescriptor::new("promises", "JavaScript Promises", "JavaScript"),
            DocumentDescriptor::new("grid", "CSS Grid", "CSS"),
            DocumentDescriptor::new("fetch", "Fetch API", "JavaScript"),
            DocumentDescriptor::new("semantics", "Semantic HTML", "HTML"),
        ]
    }

    #[test]
    fn test_group_preserves_first_seen_order() {
        let docs = sample();
        let grouped = group_by_category(&docs);

        let categories: Vec<_> = grouped.categories().collect();
        assert_eq!(categories, vec!["CSS", "JavaScript", "HTML"]);

        let css: Vec<_> = grouped.get("CSS").unwrap().iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(css, vec!["flexbox", "grid"]);
        assert!(grouped.get("Rust").is_none());
    }

    #[test]
    fn test_group_partitions_input_exactly() {
        let docs = sample();
        let grouped = group_by_category(&docs);

        let mut flattened: Vec<&DocumentDescriptor> = grouped
            .iter()
            .flat_map(|g| g.documents.iter().copied())
            .collect();
        assert_eq!(flattened.len(), docs.len());

        flattened.sort_by(|a, b| a.slug.cmp(&b.slug));
        let mut expected: Vec<&DocumentDescriptor> = docs.iter().collect();
        expected.sort_by(|a, b| a.slug.cmp(&b.slug));
        assert_eq!(flattened, expected);

        for group in grouped.iter() {
            assert!(group.documents.iter().all(|d| d.category == group.category));
        }
    }

    #[test]
    fn test_group_empty() {
        let grouped = group_by_category(&[]);
        assert!(grouped.is_empty());
        assert_eq!(grouped.len(), 0);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let docs = sample();
        let hits: Vec<_> = search(&docs, "css").iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(hits, vec!["grid"]);

        let hits: Vec<_> = search(&docs, "SCRIPT").iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(hits, vec!["promises"]);
    }

    #[test]
    fn test_search_matches_titles_only() {
        let docs = sample();
        assert!(search(&docs, "JavaScript")
            .iter()
            .all(|d| d.title.to_lowercase().contains("javascript")));
        assert!(search(&docs, "semantics").is_empty());
    }

    #[test]
    fn test_search_is_idempotent() {
        let docs = sample();
        assert_eq!(search(&docs, "a"), search(&docs, "a"));
    }

    #[test]
    fn test_view_for_empty_term_is_grouped() {
        let docs = sample();
        assert!(matches!(DocsView::for_query(&docs, None), DocsView::Grouped(_)));
        assert!(matches!(DocsView::for_query(&docs, Some("")), DocsView::Grouped(_)));

        match DocsView::for_query(&docs, Some("grid")) {
            DocsView::Results { term, matches } => {
                assert_eq!(term, "grid");
                assert_eq!(matches.len(), 1);
            }
            other => panic!("expected results, got {:?}", other),
        }
    }

    #[test]
    fn test_view_with_no_documents() {
        let docs: Vec<DocumentDescriptor> = Vec::new();
        match DocsView::for_query(&docs, None) {
            DocsView::Grouped(grouped) => assert!(grouped.is_empty()),
            other => panic!("expected grouped, got {:?}", other),
        }
        match DocsView::for_query(&docs, Some("anything")) {
            DocsView::Results { matches, .. } => assert!(matches.is_empty()),
            other => panic!("expected results, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_from_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/docs");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!([
                        {"slug": "grid", "title": "CSS Grid", "category": "CSS"}
                    ]));
            })
            .await;

        let source = DocumentSource::endpoint(server.url("/api/docs"), Duration::from_secs(5)).unwrap();
        let docs = load_documents(&source).await;

        mock.assert_async().await;
        assert_eq!(docs, vec![DocumentDescriptor::new("grid", "CSS Grid", "CSS")]);
    }

    #[tokio::test]
    async fn test_endpoint_error_status_degrades_to_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/docs");
                then.status(500).body("boom");
            })
            .await;

        let source = DocumentSource::endpoint(server.url("/api/docs"), Duration::from_secs(5)).unwrap();
        assert!(matches!(source.fetch().await, Err(DocsError::Http { .. })));
        assert!(load_documents(&source).await.is_empty());
    }

    #[tokio::test]
    async fn test_endpoint_bad_json_degrades_to_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/docs");
                then.status(200).body("{\"not\": \"a list\"}");
            })
            .await;

        let source = DocumentSource::endpoint(server.url("/api/docs"), Duration::from_secs(5)).unwrap();
        assert!(matches!(
            source.fetch().await,
            Err(DocsError::Http { source, .. }) if source.is_decode()
        ));
        assert!(load_documents(&source).await.is_empty());
    }

    #[tokio::test]
    async fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        std::fs::write(
            &path,
            r#"[{"slug":"a","title":"A","category":"X"},{"slug":"b","title":"B","category":"Y"}]"#,
        )
        .unwrap();

        let docs = load_documents(&DocumentSource::file(&path)).await;
        assert_eq!(docs.len(), 2);

        let missing = DocumentSource::file(dir.path().join("nope.json"));
        assert!(matches!(missing.fetch().await, Err(DocsError::Io { .. })));
        assert!(load_documents(&missing).await.is_empty());
    }
}
