//! HTTP route handlers for the preview server.
//!
//! Every handler performs its own page load; nothing is cached between
//! requests.

use crate::loader::fetch_markdown;
use crate::models::{Content, LoadOutcome, Tab};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Preview Page
// ============================================================================

#[derive(Deserialize)]
pub struct PageQuery {
    pub tab: Option<Tab>,
}

pub async fn index(
    Query(query): Query<PageQuery>,
    State(state): State<Arc<AppState>>,
) -> Html<String> {
    if let Some(tab) = query.tab {
        log::debug!("initial tab from query: {}", tab);
    }
    let (html, _) = state.render_page(query.tab).await;
    Html(html)
}

// ============================================================================
// Raw Source
// ============================================================================

pub async fn raw(State(state): State<Arc<AppState>>) -> Response {
    match fetch_markdown(&state.config.input).await {
        Ok(markdown) => (
            [(CONTENT_TYPE, "text/markdown; charset=utf-8")],
            markdown,
        )
            .into_response(),
        Err(e) => {
            log::error!("Error loading markdown source: {}", e);
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}

// ============================================================================
// JSON Render API
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct RenderResponse {
    pub ok: bool,
    /// Output container markup: the document, or the alert block on failure.
    pub html: String,
    pub source: Option<String>,
    pub error: Option<String>,
    pub code_blocks: usize,
    pub loaded_at: DateTime<Utc>,
}

pub async fn api_render(State(state): State<Arc<AppState>>) -> Json<RenderResponse> {
    let (page, report) = state.load_page(None).await;

    let html = match page.output.content {
        Content::Html(html) | Content::Text(html) => html,
        Content::Empty => String::new(),
    };

    let response = match report.outcome {
        LoadOutcome::Loaded { code_blocks, .. } => RenderResponse {
            ok: true,
            html,
            source: page.source.and_then(|s| match s.content {
                Content::Text(text) => Some(text),
                _ => None,
            }),
            error: None,
            code_blocks,
            loaded_at: report.loaded_at,
        },
        LoadOutcome::Failed { message } => RenderResponse {
            ok: false,
            html,
            source: None,
            error: Some(message),
            code_blocks: 0,
            loaded_at: report.loaded_at,
        },
    };

    Json(response)
}
