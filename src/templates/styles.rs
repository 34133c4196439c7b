//! CSS styles for the preview page.
//!
//! Contains the main STYLE constant. Syntax highlighting colours come from the
//! configured syntect theme and are appended separately.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base01: #586e75;
    --base00: #657b83;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --red: #dc322f;
    --blue: #268bd2;
    --cyan: #2aa198;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --link: var(--blue);
    --link-hover: var(--cyan);
    --accent: var(--base2);
    --code-bg: #ffffff;
    --alert-bg: #fbe3e0;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
}

.container {
    max-width: 900px;
    margin: 0 auto;
    padding: 1rem;
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); text-decoration: underline; }

/* Tabs */
.tab-bar {
    display: flex;
    gap: 0.25rem;
    border-bottom: 1px solid var(--border);
    margin-bottom: 1rem;
}

.tab-btn {
    background: none;
    border: 1px solid transparent;
    border-bottom: none;
    border-radius: 4px 4px 0 0;
    padding: 0.4rem 1rem;
    font-size: 0.9rem;
    color: var(--muted);
    cursor: pointer;
}

.tab-btn:hover { color: var(--fg); }

.tab-btn.active {
    color: var(--fg);
    background: var(--accent);
    border-color: var(--border);
}

.tab-pane { display: none; }
.tab-pane.active { display: block; }

/* Rendered Markdown */
.markdown-body h1, .markdown-body h2, .markdown-body h3,
.markdown-body h4, .markdown-body h5, .markdown-body h6 {
    font-weight: 600;
    margin-top: 1.5em;
    margin-bottom: 0.5em;
    color: var(--base01);
}
.markdown-body h1 { font-size: 1.6rem; border-bottom: 1px solid var(--border); padding-bottom: 0.3em; }
.markdown-body h2 { font-size: 1.3rem; }
.markdown-body h3 { font-size: 1.1rem; }
.markdown-body p, .markdown-body ul, .markdown-body ol,
.markdown-body table, .markdown-body blockquote, .markdown-body pre { margin-bottom: 1em; }
.markdown-body ul, .markdown-body ol { padding-left: 1.5em; }
.markdown-body blockquote {
    border-left: 3px solid var(--border);
    padding-left: 1em;
    color: var(--muted);
}
.markdown-body table { border-collapse: collapse; }
.markdown-body th, .markdown-body td { border: 1px solid var(--border); padding: 0.3em 0.6em; }
.markdown-body img { max-width: 100%; }
.markdown-body code {
    font-family: "SF Mono", Menlo, Consolas, monospace;
    font-size: 0.9em;
    background: var(--accent);
    padding: 0.1em 0.3em;
    border-radius: 3px;
}
.markdown-body pre {
    background: var(--code-bg);
    border: 1px solid var(--border);
    border-radius: 4px;
    padding: 0.75em 1em;
    overflow-x: auto;
}
.markdown-body pre code { background: none; padding: 0; font-size: 0.85rem; }

/* Raw source */
.source-view {
    font-family: "SF Mono", Menlo, Consolas, monospace;
    font-size: 0.85rem;
    white-space: pre-wrap;
    word-wrap: break-word;
    background: var(--code-bg);
    border: 1px solid var(--border);
    border-radius: 4px;
    padding: 0.75em 1em;
}

/* Load errors */
.alert {
    border: 1px solid var(--red);
    background: var(--alert-bg);
    border-radius: 4px;
    padding: 1rem;
    margin: 1rem 0;
}
.alert-heading { color: var(--red); margin-bottom: 0.5rem; }
.alert hr { border: none; border-top: 1px solid var(--red); opacity: 0.3; margin: 0.75rem 0; }
.alert .mb-0 { margin-bottom: 0; }

.page-meta {
    margin-top: 2rem;
    font-size: 0.8rem;
    color: var(--muted);
}
"#;
