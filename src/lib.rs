//! Markdown preview library - re-exports for testing and external use.
//!
//! The application is organized into the following modules:
//!
//! - `config`: Command-line arguments and resolved configuration
//! - `error`: Load, highlight and startup errors
//! - `highlight`: Code block highlighting (syntect)
//! - `markdown`: Markdown rendering (pulldown-cmark, ammonia)
//! - `loader`: Fetch-then-render sequence for one page load
//! - `models`: The page elements and tab state
//! - `tabs`: Preview/source tab switching
//! - `templates`: HTML/CSS/JS templates
//! - `handlers`: HTTP route handlers

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;

pub mod config;
pub mod error;
pub mod handlers;
pub mod highlight;
pub mod loader;
pub mod markdown;
pub mod models;
pub mod tabs;
pub mod templates;

use config::Config;
use error::Result;
use highlight::SyntectHighlighter;
use markdown::Renderer;
use models::{LoadReport, Page, Tab};

// ============================================================================
// Application State
// ============================================================================

/// Immutable per-process state shared by all requests.
pub struct AppState {
    pub config: Config,
    pub highlighter: Arc<SyntectHighlighter>,
    pub renderer: Renderer,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let highlighter = Arc::new(SyntectHighlighter::new(&config.theme)?);
        let renderer = Renderer::new(config.render, highlighter.clone());

        Ok(Self {
            config,
            highlighter,
            renderer,
        })
    }

    pub fn new_page(&self) -> Page {
        Page::new(self.config.tabs)
    }

    /// One page load: fetch and render into a fresh page, then apply `tab`.
    pub async fn load_page(&self, tab: Option<Tab>) -> (Page, LoadReport) {
        let mut page = self.new_page();
        let report = loader::load_into(&mut page, &self.config.input, &self.renderer).await;
        if let Some(tab) = tab {
            tabs::select(&mut page, tab);
        }
        (page, report)
    }

    /// Full HTML document for one page load.
    pub async fn render_page(&self, tab: Option<Tab>) -> (String, LoadReport) {
        let (page, report) = self.load_page(tab).await;
        let html = templates::render_viewer(
            &page,
            &self.config.title,
            self.highlighter.theme_css(),
            &report,
        );
        (html, report)
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: Arc<AppState>) -> Router {
    let asset_dir = state.config.input.asset_dir();

    let app = Router::new()
        .route("/", get(handlers::index))
        .route("/raw", get(handlers::raw))
        .route("/api/render", get(handlers::api_render))
        .with_state(state);

    // Relative links in the document (images etc.) resolve next to a local
    // input given with a directory, e.g. `./input.md`.
    match asset_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    }
}

// Re-export commonly used types
pub use error::{AppError, HighlightError, LoadError};
pub use highlight::{CodeHighlighter, DEFAULT_THEME};
pub use loader::{
    error_block, fetch_markdown, load_into, ResourceLocation, OUTPUT_HEADING, SOURCE_ERROR_TEXT,
};
pub use markdown::{html_escape, sanitize, slugify, RenderOptions, Rendered, Slugger};
pub use models::{
    ClassList, Content, Element, LoadOutcome, ACTIVE_CLASS, OUTPUT_ID, PREVIEW_TAB_ID, SOURCE_ID,
    SOURCE_TAB_ID,
};
pub use tabs::{active_tab, select};
