//! Fetch-then-render sequence for one page load.
//!
//! The loader is the only producer of page content. It fetches the Markdown
//! resource once, writes the rendered preview (and, with tabs, the raw
//! source) into the page, and turns any fetch failure into a visible alert
//! instead of returning it.

use crate::error::LoadError;
use crate::markdown::{html_escape, Renderer};
use crate::models::{Content, LoadOutcome, LoadReport, Page};
use chrono::Utc;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Fixed heading placed above the rendered document.
pub const OUTPUT_HEADING: &str = "<h1>Project Overview</h1>";

/// Shown in the source container when the resource could not be loaded.
pub const SOURCE_ERROR_TEXT: &str = "Error loading markdown source.";

// ============================================================================
// Resource Location
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    Url(Url),
    File(PathBuf),
}

impl ResourceLocation {
    /// `http(s)://` strings are URLs; anything else is a file path.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty input location".to_string());
        }

        match Url::parse(s) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                if url.host_str().is_none() {
                    return Err(format!("no host in URL: {}", s));
                }
                Ok(ResourceLocation::Url(url))
            }
            // A single letter "scheme" is a Windows drive, not a URL.
            Ok(url) if url.scheme().len() > 1 => {
                Err(format!("unsupported URL scheme '{}': {}", url.scheme(), s))
            }
            _ => Ok(ResourceLocation::File(PathBuf::from(s))),
        }
    }

    /// Short name for messages: the last path segment.
    pub fn file_name(&self) -> String {
        let name = match self {
            ResourceLocation::Url(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .map(|s| s.to_string()),
            ResourceLocation::File(path) => path
                .file_name()
                .map(|s| s.to_string_lossy().to_string()),
        };
        name.filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.to_string())
    }

    /// Directory to serve sibling assets from: the explicit parent of a local
    /// file. A bare file name (`input.md`) has none.
    pub fn asset_dir(&self) -> Option<PathBuf> {
        match self {
            ResourceLocation::Url(_) => None,
            ResourceLocation::File(path) => path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_path_buf()),
        }
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceLocation::Url(url) => write!(f, "{}", url),
            ResourceLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ============================================================================
// Fetching
// ============================================================================

pub async fn fetch_markdown(location: &ResourceLocation) -> Result<String, LoadError> {
    match location {
        ResourceLocation::Url(url) => {
            let response = reqwest::get(url.clone()).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("").to_string(),
                });
            }
            Ok(response.text().await?)
        }
        ResourceLocation::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Alert block shown in place of the document when loading fails.
pub fn error_block(message: &str, resource_name: &str) -> String {
    format!(
        r#"<div class="alert alert-danger" role="alert">
    <h4 class="alert-heading">Error Loading Content</h4>
    <p><strong>Error:</strong> {}</p>
    <hr>
    <p class="mb-0">Please ensure the <code>{}</code> file is present in the same directory.</p>
</div>"#,
        html_escape(message),
        html_escape(resource_name)
    )
}

/// Write already fetched text (or the fetch error) into the page.
pub fn apply(
    page: &mut Page,
    fetched: Result<String, LoadError>,
    location: &ResourceLocation,
    renderer: &Renderer,
) -> LoadReport {
    let outcome = match fetched {
        Ok(markdown) => {
            let rendered = renderer.render(&markdown);
            page.output.content = Content::Html(format!("{}{}", OUTPUT_HEADING, rendered.html));

            let bytes = markdown.len();
            if let Some(source) = page.source.as_mut() {
                source.content = Content::Text(markdown);
            }

            log::info!(
                "Rendered {} ({} bytes, {} code blocks)",
                location,
                bytes,
                rendered.code_blocks
            );
            LoadOutcome::Loaded {
                bytes,
                code_blocks: rendered.code_blocks,
            }
        }
        Err(err) => {
            log::error!("Error loading or converting markdown: {}", err);
            let message = err.to_string();
            page.output.content = Content::Html(error_block(&message, &location.file_name()));
            if let Some(source) = page.source.as_mut() {
                source.content = Content::Text(SOURCE_ERROR_TEXT.to_string());
            }
            LoadOutcome::Failed { message }
        }
    };

    LoadReport {
        outcome,
        loaded_at: Utc::now(),
    }
}

/// Run the whole sequence once: fetch, render, write into `page`.
pub async fn load_into(
    page: &mut Page,
    location: &ResourceLocation,
    renderer: &Renderer,
) -> LoadReport {
    let fetched = fetch_markdown(location).await;
    apply(page, fetched, location, renderer)
}
