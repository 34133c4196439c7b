//! Shared HTML components for the preview page.
//!
//! Contains element rendering, the tab bar, and the tab click script.

use crate::markdown::html_escape;
use crate::models::{Content, Element, Page, OUTPUT_ID, PREVIEW_TAB_ID, SOURCE_ID, SOURCE_TAB_ID};

// ============================================================================
// Elements
// ============================================================================

fn class_attr(element: &Element) -> String {
    if element.classes.is_empty() {
        String::new()
    } else {
        format!(r#" class="{}""#, html_escape(&element.classes.to_string()))
    }
}

fn content_html(content: &Content) -> String {
    match content {
        Content::Empty => String::new(),
        Content::Html(html) => html.clone(),
        Content::Text(text) => html_escape(text),
    }
}

/// Render an element as `<tag id=.. class=..>content</tag>`.
pub fn element_html(tag: &str, element: &Element) -> String {
    let mut content = content_html(&element.content);
    // The parser drops one newline directly after `<pre>`.
    if tag == "pre" && content.starts_with('\n') {
        content.insert(0, '\n');
    }
    format!(
        r#"<{tag} id="{id}"{class}>{content}</{tag}>"#,
        tag = tag,
        id = element.id,
        class = class_attr(element),
        content = content,
    )
}

fn tab_button(element: &Element, label: &str) -> String {
    format!(
        r#"<button type="button" id="{id}"{class}>{label}</button>"#,
        id = element.id,
        class = class_attr(element),
        label = label,
    )
}

// ============================================================================
// Tab Bar
// ============================================================================

/// Preview/Source buttons, or nothing for a page without tabs.
pub fn tab_bar(page: &Page) -> String {
    match (&page.preview_tab, &page.source_tab) {
        (Some(preview), Some(source)) => format!(
            r#"<nav class="tab-bar">
            {}
            {}
        </nav>"#,
            tab_button(preview, "Preview"),
            tab_button(source, "Source"),
        ),
        _ => String::new(),
    }
}

/// Click handlers performing the same class transitions as `tabs::select`.
pub fn tab_script(page: &Page) -> String {
    if !page.has_tabs() {
        return String::new();
    }

    let ids = serde_json::json!({
        "output": OUTPUT_ID,
        "source": SOURCE_ID,
        "previewTab": PREVIEW_TAB_ID,
        "sourceTab": SOURCE_TAB_ID,
    });

    format!(
        r#"<script>
    (function() {{
        const ids = {ids};
        const output = document.getElementById(ids.output);
        const source = document.getElementById(ids.source);
        const previewTab = document.getElementById(ids.previewTab);
        const sourceTab = document.getElementById(ids.sourceTab);
        if (!output || !source || !previewTab || !sourceTab) return;

        function show(preview) {{
            previewTab.classList.toggle('active', preview);
            output.classList.toggle('active', preview);
            sourceTab.classList.toggle('active', !preview);
            source.classList.toggle('active', !preview);
            const url = new URL(window.location.href);
            url.searchParams.set('tab', preview ? 'preview' : 'source');
            window.history.replaceState(null, '', url);
        }}

        previewTab.addEventListener('click', () => show(true));
        sourceTab.addEventListener('click', () => show(false));
    }})();
    </script>"#,
        ids = ids
    )
}
