//! # tinyweb-render
//!
//! Template rendering library for tinyweb.
//!
//! This crate turns the read models of `tinyweb-core` into HTML pages
//! using Askama templates.

pub mod templates;

pub use templates::{
    render_page, DocLink, DocSection, DocsTemplate, HomeTemplate, Layout, NotFoundTemplate,
    ProjectTemplate, ProjectsTemplate, RenderError, StatCard,
};
