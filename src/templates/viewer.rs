//! Viewer template for the preview page.
//!
//! Contains the full document: tab bar, output and source containers, theme
//! CSS for highlighted code, and the load timestamp.

use crate::markdown::html_escape;
use crate::models::{LoadOutcome, LoadReport, Page};

use super::components::{element_html, tab_bar, tab_script};
use super::styles::STYLE;

// ============================================================================
// Viewer Template
// ============================================================================

pub fn render_viewer(page: &Page, title: &str, theme_css: &str, report: &LoadReport) -> String {
    let source_html = page
        .source
        .as_ref()
        .map(|source| element_html("pre", source))
        .unwrap_or_default();

    let status = match &report.outcome {
        LoadOutcome::Loaded { bytes, code_blocks } => format!(
            "{} bytes, {} code block{}",
            bytes,
            code_blocks,
            if *code_blocks == 1 { "" } else { "s" }
        ),
        LoadOutcome::Failed { .. } => "load failed".to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
    <style>{theme_css}</style>
</head>
<body>
    <div class="container">
        {tabs}
        {output}
        {source}
        <p class="page-meta">Loaded {loaded_at} &middot; {status}</p>
    </div>
    {script}
</body>
</html>"#,
        title = html_escape(title),
        style = STYLE,
        theme_css = theme_css,
        tabs = tab_bar(page),
        output = element_html("div", &page.output),
        source = source_html,
        loaded_at = report.loaded_at.format("%Y-%m-%d %H:%M:%S UTC"),
        status = status,
        script = tab_script(page),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Content;
    use chrono::Utc;

    fn loaded() -> LoadReport {
        LoadReport {
            outcome: LoadOutcome::Loaded {
                bytes: 12,
                code_blocks: 1,
            },
            loaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_viewer_with_tabs() {
        let mut page = Page::with_tabs();
        page.output.content = Content::Html("<h1>Project Overview</h1><p>x</p>".to_string());
        page.source.as_mut().unwrap().content = Content::Text("x <y>".to_string());

        let html = render_viewer(&page, "Docs & Notes", ".hl-source { color: red; }", &loaded());

        assert!(html.contains("<title>Docs &amp; Notes</title>"));
        assert!(html.contains(".hl-source { color: red; }"));
        assert!(html.contains(r#"<div id="markdown-output" class="tab-pane markdown-body active"><h1>"#));
        assert!(html.contains(r#"<pre id="markdown-source" class="tab-pane source-view">x &lt;y&gt;</pre>"#));
        assert!(html.contains("1 code block<"));
        assert!(html.contains("<script>"));
    }

    #[test]
    fn test_render_viewer_single() {
        let page = Page::single();
        let report = LoadReport {
            outcome: LoadOutcome::Failed {
                message: "boom".to_string(),
            },
            loaded_at: Utc::now(),
        };
        let html = render_viewer(&page, "Doc", "", &report);

        assert!(!html.contains("markdown-source"));
        assert!(!html.contains(r#"<nav class="tab-bar""#));
        assert!(!html.contains("addEventListener"));
        assert!(html.contains("load failed"));
    }
}
