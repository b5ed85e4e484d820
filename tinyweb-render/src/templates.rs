//! Askama template definitions.

use askama::Template;
use thiserror::Error;
use tinyweb_core::{
    group_by_category, slugify, Config, DocsView, DocumentDescriptor, GroupedDocuments,
    ProjectListing, ProjectPage, ProjectSummary, SiteData, Social,
};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Render any page template to a string
pub fn render_page<T: Template>(template: &T) -> Result<String, RenderError> {
    Ok(template.render()?)
}

/// Values shared by every page through `base.html`
#[derive(Debug, Clone)]
pub struct Layout {
    pub site_title: String,
    pub description: Option<String>,
    pub base_url: String,
    /// Public origin from `site.url`, without a trailing slash
    pub site_url: Option<String>,
    /// Absolute URL of the current page; only set when `site_url` is
    pub canonical: Option<String>,
    pub year: i32,
}

impl Layout {
    pub fn from_config(config: &Config, year: i32) -> Self {
        Self {
            site_title: config.site.title.clone(),
            description: config.site.description.clone(),
            base_url: config.normalized_base_url(),
            site_url: config
                .site
                .url
                .as_deref()
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            canonical: None,
            year,
        }
    }

    /// The same layout for the page at `path`, relative to the base URL
    pub fn at(mut self, path: &str) -> Self {
        self.canonical = self
            .site_url
            .as_ref()
            .map(|origin| format!("{}{}{}", origin, self.base_url, path));
        self
    }
}

/// One statistic on the homepage
#[derive(Debug, Clone)]
pub struct StatCard {
    pub label: &'static str,
    pub count: usize,
    pub unit: &'static str,
}

/// Homepage template
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub tagline: Option<String>,
    pub stats: Vec<StatCard>,
    pub socials: Vec<Social>,
}

impl HomeTemplate {
    pub fn new(layout: Layout, tagline: Option<String>, data: &SiteData) -> Self {
        let counts = data.counts();
        let stats = vec![
            StatCard {
                label: "Roadmaps",
                count: counts.roadmaps,
                unit: "available",
            },
            StatCard {
                label: "Documentation",
                count: counts.docs,
                unit: "guides",
            },
            StatCard {
                label: "Projects",
                count: counts.projects,
                unit: "tools & apps",
            },
            StatCard {
                label: "Tools",
                count: counts.tools,
                unit: "available",
            },
        ];

        Self {
            layout: layout.at(""),
            tagline,
            stats,
            socials: data.socials().to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocLink {
    pub title: String,
    pub href: String,
}

impl DocLink {
    fn new(doc: &DocumentDescriptor, base_url: &str) -> Self {
        Self {
            title: doc.title.clone(),
            href: format!("{}docs/{}", base_url, doc.slug),
        }
    }
}

/// A category section in the grouped docs view
#[derive(Debug, Clone)]
pub struct DocSection {
    pub category: String,
    pub anchor: String,
    pub docs: Vec<DocLink>,
}

/// Documentation index template
///
/// The grouped sections are always rendered so the inline script can
/// search client-side; `results` is filled when the server handled a query.
#[derive(Template)]
#[template(path = "docs.html")]
pub struct DocsTemplate {
    pub layout: Layout,
    pub query: String,
    pub sections: Vec<DocSection>,
    pub results: Option<Vec<DocLink>>,
}

impl DocsTemplate {
    pub fn new(layout: Layout, docs: &[DocumentDescriptor], view: &DocsView<'_>) -> Self {
        let layout = layout.at("docs");
        let base_url = layout.base_url.clone();

        let (query, sections, results) = match view {
            DocsView::Grouped(groups) => (String::new(), doc_sections(groups, &base_url), None),
            DocsView::Results { term, matches } => (
                term.clone(),
                doc_sections(&group_by_category(docs), &base_url),
                Some(
                    matches
                        .iter()
                        .map(|doc| DocLink::new(doc, &base_url))
                        .collect(),
                ),
            ),
        };

        Self {
            layout,
            query,
            sections,
            results,
        }
    }
}

fn doc_sections(groups: &GroupedDocuments<'_>, base_url: &str) -> Vec<DocSection> {
    groups
        .iter()
        .map(|group| DocSection {
            category: group.category.to_string(),
            anchor: slugify(group.category),
            docs: group
                .documents
                .iter()
                .map(|doc| DocLink::new(doc, base_url))
                .collect(),
        })
        .collect()
}

/// Projects listing template
#[derive(Template)]
#[template(path = "projects.html")]
pub struct ProjectsTemplate {
    pub layout: Layout,
    pub missing: bool,
    pub projects: Vec<ProjectSummary>,
}

impl ProjectsTemplate {
    pub fn new(layout: Layout, listing: &ProjectListing) -> Self {
        Self {
            layout: layout.at("projects"),
            missing: matches!(listing, ProjectListing::Missing),
            projects: listing.projects().to_vec(),
        }
    }
}

/// Project detail page template
#[derive(Template)]
#[template(path = "project.html")]
pub struct ProjectTemplate {
    pub layout: Layout,
    pub title: String,
    pub description: String,
    pub content: String,
    pub toc_html: Option<String>,
}

impl ProjectTemplate {
    pub fn new(layout: Layout, page: &ProjectPage) -> Self {
        Self {
            layout: layout.at(&format!("projects/{}", page.summary.slug)),
            title: page.summary.title.clone(),
            description: page.summary.description.clone(),
            content: page.content.html.clone(),
            toc_html: page.content.toc_html(),
        }
    }
}

/// 404 error page template
#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyweb_core::{MarkdownProcessor, SiteCounts};

    fn layout() -> Layout {
        Layout {
            site_title: "Teeny Tiny Web".into(),
            description: None,
            base_url: "/".into(),
            site_url: None,
            canonical: None,
            year: 2026,
        }
    }

    fn docs() -> Vec<DocumentDescriptor> {
        vec![
            DocumentDescriptor::new("grid", "CSS Grid", "CSS"),
            DocumentDescriptor::new("fetch", "Fetch API", "JavaScript"),
            DocumentDescriptor::new("flexbox", "Flexbox", "CSS"),
        ]
    }

    #[test]
    fn test_home_shows_counts_and_socials() {
        let data = SiteData::from_parts(
            SiteCounts {
                roadmaps: 7,
                docs: 12,
                projects: 3,
                tools: 5,
            },
            vec![Social {
                name: "github".into(),
                link: "https://github.com/teenytiny".into(),
            }],
        );
        let html = render_page(&HomeTemplate::new(
            layout(),
            Some("Small but Mighty Dev Resources".into()),
            &data,
        ))
        .unwrap();

        assert!(html.contains("<h1>Teeny Tiny Web</h1>"));
        assert!(html.contains("Small but Mighty Dev Resources"));
        assert!(html.contains(r#"data-count="7">7</span>"#));
        assert!(html.contains(r#"data-count="12">12</span>"#));
        assert!(html.contains("https://github.com/teenytiny"));
        assert!(html.contains(r#"href="/docs""#));
        assert!(html.contains(r#"href="/projects""#));
    }

    #[test]
    fn test_docs_grouped_view() {
        let docs = docs();
        let view = DocsView::for_query(&docs, None);
        let html = render_page(&DocsTemplate::new(layout(), &docs, &view)).unwrap();

        assert!(html.contains(r#"<section class="doc-category" id="css">"#));
        assert!(html.contains(r#"<section class="doc-category" id="javascript">"#));
        assert!(html.contains(r#"href="/docs/grid""#));
        assert!(html.find("CSS Grid").unwrap() < html.find("Flexbox").unwrap());
        assert!(!html.contains(r#"<ul id="docs-results" class="doc-results">"#));
    }

    #[test]
    fn test_docs_results_view() {
        let docs = docs();
        let view = DocsView::for_query(&docs, Some("fetch"));
        let html = render_page(&DocsTemplate::new(layout(), &docs, &view)).unwrap();

        assert!(html.contains(r#"<ul id="docs-results" class="doc-results">"#));
        assert!(html.contains(r#"<div id="docs-grouped" hidden>"#));
        assert!(html.contains(r#"value="fetch""#));
        assert!(!html.contains(r#"<p class="empty" id="docs-no-results">No results found.</p>"#));
    }

    #[test]
    fn test_docs_no_results() {
        let docs: Vec<DocumentDescriptor> = Vec::new();
        let view = DocsView::for_query(&docs, Some("zzz"));
        let html = render_page(&DocsTemplate::new(layout(), &docs, &view)).unwrap();

        assert!(!html.contains("<section class=\"doc-category\""));
        assert!(html.contains(r#"<p class="empty" id="docs-no-results">No results found.</p>"#));
    }

    #[test]
    fn test_projects_states() {
        let html = render_page(&ProjectsTemplate::new(layout(), &ProjectListing::Missing)).unwrap();
        assert!(html.contains("No projects found."));
        assert!(!html.contains("<li class=\"project\""));

        let html = render_page(&ProjectsTemplate::new(
            layout(),
            &ProjectListing::Found(Vec::new()),
        ))
        .unwrap();
        assert!(html.contains("No projects available."));
        assert!(!html.contains("<li class=\"project\""));

        let listing = ProjectListing::Found(vec![ProjectSummary {
            slug: "counter".into(),
            title: "Counter".into(),
            description: "Click to count.".into(),
        }]);
        let html = render_page(&ProjectsTemplate::new(layout(), &listing)).unwrap();
        assert!(html.contains("<h2>Counter</h2>"));
        assert!(html.contains("Click to count."));
        assert!(html.contains(r#"href="/projects/counter""#));
        assert_eq!(html.matches("<li class=\"project\"").count(), 1);
    }

    #[test]
    fn test_project_detail() {
        let page = ProjectPage {
            summary: ProjectSummary {
                slug: "counter".into(),
                title: "Counter".into(),
                description: "Click to count.".into(),
            },
            content: MarkdownProcessor::new().convert("## Counter\n\nClick **here**.\n"),
        };
        let html = render_page(&ProjectTemplate::new(layout(), &page)).unwrap();
        assert!(html.contains("<strong>here</strong>"));
        assert!(html.contains("toc-level-2"));
    }

    #[test]
    fn test_base_url_prefixes_links() {
        let mut layout = layout();
        layout.base_url = "/site/".into();
        let html = render_page(&NotFoundTemplate { layout }).unwrap();
        assert!(html.contains(r#"href="/site/projects""#));
        assert!(html.contains("Page not found"));
    }

    #[test]
    fn test_docs_sections_follow_the_view() {
        let all = docs();
        let css_only = vec![all[0].clone(), all[2].clone()];
        let view = DocsView::for_query(&css_only, None);
        let html = render_page(&DocsTemplate::new(layout(), &all, &view)).unwrap();

        assert!(html.contains(r#"<section class="doc-category" id="css">"#));
        assert!(!html.contains(r#"<section class="doc-category" id="javascript">"#));
    }

    #[test]
    fn test_canonical_link_from_site_url() {
        let config = Config::from_yaml(
            "site:\n  title: Teeny\n  url: \"https://teeny.dev/\"\nbase_url: \"/site\"\n",
        )
        .unwrap();
        let configured = Layout::from_config(&config, 2026);
        assert_eq!(configured.site_url.as_deref(), Some("https://teeny.dev"));

        let listing = ProjectListing::Found(Vec::new());
        let html = render_page(&ProjectsTemplate::new(configured.clone(), &listing)).unwrap();
        assert!(html.contains(r#"<link rel="canonical" href="https://teeny.dev/site/projects">"#));

        let html = render_page(&NotFoundTemplate { layout: configured }).unwrap();
        assert!(!html.contains("rel=\"canonical\""));

        let html = render_page(&ProjectsTemplate::new(layout(), &listing)).unwrap();
        assert!(!html.contains("rel=\"canonical\""));
    }
}
