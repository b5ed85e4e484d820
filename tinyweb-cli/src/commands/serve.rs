//! HTTP server with page routes and JSON APIs.

use super::{load_config, page_layout};
use crate::api;
use anyhow::{Context, Result};
use askama::Template;
use axum::{
    extract::{Path as AxumPath, Query, Request, State},
    handler::Handler,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tinyweb_core::{
    document_source, load_documents, load_project, load_projects, Config, DocsView,
    DocumentSource, SiteData,
};
use tinyweb_render::{
    render_page, DocsTemplate, HomeTemplate, NotFoundTemplate, ProjectTemplate, ProjectsTemplate,
};
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub(crate) struct AppState {
    site: Arc<Site>,
}

/// Everything loaded once at startup; content is still read per request
struct Site {
    config: Config,
    data: SiteData,
    docs_source: DocumentSource,
}

impl AppState {
    pub(crate) fn load(config: Config) -> Result<Self> {
        let data = SiteData::load(&config.data_dir()).context("Failed to load site data")?;
        let docs_source = document_source(&config).context("Failed to set up document source")?;
        Ok(Self {
            site: Arc::new(Site {
                config,
                data,
                docs_source,
            }),
        })
    }
}

/// Start the server and block until it exits
pub async fn serve(config_path: &Path, port: Option<u16>) -> Result<()> {
    let config = load_config(config_path)?;
    let addr = format!(
        "{}:{}",
        config.server.host,
        port.unwrap_or(config.server.port)
    );
    let state = AppState::load(config)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Serving {} on http://{}", state.site.config.site.title, addr);
    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}

pub(crate) fn router(state: AppState) -> Router {
    // Page links carry the base URL, so every route lives under it
    let base_url = state.site.config.normalized_base_url();
    let prefix = base_url.trim_end_matches('/').to_string();
    let at = |path: &str| format!("{}{}", prefix, path);

    let mut app = Router::new()
        .route(&base_url, get(home_page))
        .route(&at("/docs"), get(docs_page))
        .route(&at("/projects"), get(projects_page))
        .route(&at("/projects/{slug}"), get(project_page))
        .route(&at("/api/docs"), get(api_docs))
        .route(&at("/api/projects"), get(api_projects))
        .route(&at("/api/stats"), get(api_stats));
    if !prefix.is_empty() {
        app = app.route(&prefix, get(home_page));
    }

    let app = match state.site.config.static_dir() {
        Some(dir) => {
            let not_found = not_found_page.with_state(state.clone());
            let files = ServeDir::new(dir)
                .not_found_service(not_found)
                .map_request(move |req: Request| strip_base(&prefix, req));
            app.fallback_service(files)
        }
        None => app.fallback(not_found_page),
    };

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Rewrite a request path so static files resolve relative to the base URL
fn strip_base(prefix: &str, mut req: Request) -> Request {
    let Some(rest) = req.uri().path().strip_prefix(prefix) else {
        return req;
    };
    let rest = if rest.is_empty() { "/" } else { rest };
    let target = match req.uri().query() {
        Some(query) => format!("{}?{}", rest, query),
        None => rest.to_string(),
    };
    if let Ok(uri) = target.parse() {
        *req.uri_mut() = uri;
    }
    req
}

fn html_response<T: Template>(status: StatusCode, template: &T) -> Response {
    match render_page(template) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

async fn home_page(State(state): State<AppState>) -> Response {
    let site = &state.site;
    let template = HomeTemplate::new(
        page_layout(&site.config),
        site.config.site.tagline.clone(),
        &site.data,
    );
    html_response(StatusCode::OK, &template)
}

#[derive(Deserialize)]
struct DocsParams {
    q: Option<String>,
}

async fn docs_page(State(state): State<AppState>, Query(params): Query<DocsParams>) -> Response {
    let site = &state.site;
    let docs = load_documents(&site.docs_source).await;
    let view = DocsView::for_query(&docs, params.q.as_deref());
    let template = DocsTemplate::new(page_layout(&site.config), &docs, &view);
    html_response(StatusCode::OK, &template)
}

async fn projects_page(State(state): State<AppState>) -> Response {
    let dir = state.site.config.projects_dir();
    match tokio::task::spawn_blocking(move || load_projects(&dir)).await {
        Ok(listing) => {
            let template = ProjectsTemplate::new(page_layout(&state.site.config), &listing);
            html_response(StatusCode::OK, &template)
        }
        Err(e) => {
            tracing::error!("Project scan panicked: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to list projects").into_response()
        }
    }
}

async fn project_page(State(state): State<AppState>, AxumPath(slug): AxumPath<String>) -> Response {
    let dir = state.site.config.projects_dir();
    match tokio::task::spawn_blocking(move || load_project(&dir, &slug)).await {
        Ok(Some(page)) => {
            let template = ProjectTemplate::new(page_layout(&state.site.config), &page);
            html_response(StatusCode::OK, &template)
        }
        Ok(None) => not_found_page(State(state)).await,
        Err(e) => {
            tracing::error!("Project render panicked: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render project").into_response()
        }
    }
}

async fn not_found_page(State(state): State<AppState>) -> Response {
    let template = NotFoundTemplate {
        layout: page_layout(&state.site.config),
    };
    html_response(StatusCode::NOT_FOUND, &template)
}

// ---- API handlers ----

/// The bundled document list, served as the default retrieval endpoint
async fn api_docs(State(state): State<AppState>) -> Response {
    let source = DocumentSource::file(state.site.config.docs_file());
    match source.fetch().await {
        Ok(docs) => Json(docs).into_response(),
        Err(e) => {
            tracing::error!("Failed to serve document list: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Document list unavailable",
            )
                .into_response()
        }
    }
}

async fn api_projects(State(state): State<AppState>) -> Response {
    let dir = state.site.config.projects_dir();
    match tokio::task::spawn_blocking(move || load_projects(&dir)).await {
        Ok(listing) => {
            Json(api::envelope("projects.list", api::ProjectsData::new(&listing))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Task join error: {}", e),
        )
            .into_response(),
    }
}

async fn api_stats(State(state): State<AppState>) -> Response {
    Json(api::envelope("site.stats", state.site.data.counts())).into_response()
}
