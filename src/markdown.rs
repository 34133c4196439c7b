//! Markdown rendering.
//!
//! Wraps pulldown-cmark with the preview's parser settings: GitHub flavoured
//! extensions, soft breaks rendered as `<br />`, slugged heading ids, and a
//! highlight callback applied to every code block. Output is sanitized with
//! ammonia unless disabled.

use crate::highlight::CodeHighlighter;
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render single newlines as `<br />`.
    pub breaks: bool,
    /// Tables, strikethrough, task lists and footnotes.
    pub gfm: bool,
    pub header_ids: bool,
    /// Obfuscate autolinked e-mail addresses. pulldown-cmark never does, so
    /// this must stay off.
    pub mangle: bool,
    pub sanitize: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            breaks: true,
            gfm: true,
            header_ids: true,
            mangle: false,
            sanitize: true,
        }
    }
}

impl RenderOptions {
    fn parser_options(&self) -> Options {
        let mut options = Options::ENABLE_HEADING_ATTRIBUTES;
        if self.gfm {
            options |= Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES;
        }
        options
    }
}

// ============================================================================
// Renderer
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    /// Number of code blocks passed through the highlighter.
    pub code_blocks: usize,
}

pub struct Renderer {
    options: RenderOptions,
    highlighter: Arc<dyn CodeHighlighter>,
}

impl Renderer {
    pub fn new(options: RenderOptions, highlighter: Arc<dyn CodeHighlighter>) -> Self {
        Self {
            options,
            highlighter,
        }
    }

    pub fn render(&self, markdown: &str) -> Rendered {
        let parser = Parser::new_ext(markdown, self.options.parser_options());

        let mut events: Vec<Event> = Vec::new();
        let mut code: Option<(Option<String>, String)> = None;
        let mut code_blocks = 0;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code = Some((lang, String::new()));
                }
                Event::Text(text) if code.is_some() => {
                    if let Some((_, buf)) = code.as_mut() {
                        buf.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, buf)) = code.take() {
                        code_blocks += 1;
                        events.push(Event::Html(CowStr::from(
                            self.code_block_html(&buf, lang.as_deref()),
                        )));
                    }
                }
                Event::SoftBreak if self.options.breaks => events.push(Event::HardBreak),
                other => events.push(other),
            }
        }

        if self.options.header_ids {
            assign_heading_ids(&mut events);
        }

        let mut html_output = String::new();
        pulldown_cmark::html::push_html(&mut html_output, events.into_iter());

        if self.options.sanitize {
            html_output = sanitize(&html_output);
        }

        Rendered {
            html: html_output,
            code_blocks,
        }
    }

    fn code_block_html(&self, code: &str, lang: Option<&str>) -> String {
        let class = match lang {
            Some(lang) => format!("hljs language-{}", html_escape(lang)),
            None => "hljs".to_string(),
        };
        format!(
            "<pre><code class=\"{}\">{}</code></pre>\n",
            class,
            self.highlighter.highlight(code, lang)
        )
    }
}

// ============================================================================
// Heading Ids
// ============================================================================

/// GitHub-style heading slug: lowercase, symbols dropped, spaces to `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.trim().to_lowercase().chars() {
        if c.is_whitespace() {
            pending_dash = true;
            continue;
        }
        if !c.is_alphanumeric() && c != '-' && c != '_' {
            continue;
        }
        if pending_dash && !slug.is_empty() {
            slug.push('-');
        }
        pending_dash = false;
        slug.push(c);
    }
    slug
}

/// Hands out unique slugs, suffixing repeats with `-1`, `-2`, ...
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut candidate = base.clone();
        let mut count = self.seen.get(&base).copied().unwrap_or(0);
        while self.seen.contains_key(&candidate) {
            count += 1;
            candidate = format!("{}-{}", base, count);
        }
        self.seen.insert(base.clone(), count);
        self.seen.insert(candidate.clone(), 0);
        candidate
    }

    fn reserve(&mut self, id: &str) {
        self.seen.entry(id.to_string()).or_insert(0);
    }
}

fn assign_heading_ids(events: &mut [Event]) {
    let mut slugger = Slugger::default();

    // Explicit `{#id}` attributes claim their ids before any slug is generated.
    for event in events.iter() {
        if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
            slugger.reserve(id);
        }
    }

    let mut i = 0;
    while i < events.len() {
        let needs_id = matches!(&events[i], Event::Start(Tag::Heading { id: None, .. }));
        if !needs_id {
            i += 1;
            continue;
        }

        let mut text = String::new();
        let mut j = i + 1;
        while j < events.len() {
            match &events[j] {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
            j += 1;
        }

        let slug = slugger.slug(&text);
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(slug));
        }
        i = j;
    }
}

// ============================================================================
// HTML Helpers
// ============================================================================

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Table cells may only carry the alignment pulldown-cmark writes.
fn keep_alignment<'u>(_element: &str, attribute: &str, value: &'u str) -> Option<Cow<'u, str>> {
    match (attribute, value) {
        ("style", "text-align: left" | "text-align: center" | "text-align: right") => {
            Some(Cow::Borrowed(value))
        }
        ("style", _) => None,
        _ => Some(Cow::Borrowed(value)),
    }
}

/// Strip scripts and unknown markup while keeping heading ids, highlight
/// classes, table alignment and task-list checkboxes.
pub fn sanitize(html: &str) -> String {
    ammonia::Builder::default()
        .add_generic_attributes(&["id"])
        .add_tag_attributes("th", &["style"])
        .add_tag_attributes("td", &["style"])
        .attribute_filter(keep_alignment)
        .add_tags(&["input"])
        .add_tag_attributes("input", &["type", "checked", "disabled"])
        .add_tag_attributes("code", &["class"])
        .add_tag_attributes("span", &["class"])
        .add_tag_attributes("pre", &["class"])
        .add_tag_attributes("sup", &["class"])
        .add_tag_attributes("div", &["class"])
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Wraps code in a marker and counts calls.
    #[derive(Default)]
    struct CountingHighlighter {
        calls: AtomicUsize,
    }

    impl CodeHighlighter for CountingHighlighter {
        fn highlight(&self, code: &str, lang: Option<&str>) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            format!(
                "<span class=\"hl-mark\">[{}]{}</span>",
                lang.unwrap_or("auto"),
                html_escape(code)
            )
        }
    }

    fn renderer_with(options: RenderOptions) -> (Renderer, Arc<CountingHighlighter>) {
        let highlighter = Arc::new(CountingHighlighter::default());
        (Renderer::new(options, highlighter.clone()), highlighter)
    }

    fn render(markdown: &str) -> Rendered {
        renderer_with(RenderOptions::default()).0.render(markdown)
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("  What's new in v2.0?  "), "whats-new-in-v20");
        assert_eq!(slugify("snake_case & kebab-case"), "snake_case-kebab-case");
        assert_eq!(slugify("Übersicht"), "übersicht");
        assert_eq!(slugify("🚀 Launch"), "launch");
        assert_eq!(slugify("Deploy → Prod ©"), "deploy-prod");
    }

    #[test]
    fn test_slugger_dedupes() {
        let mut slugger = Slugger::default();
        assert_eq!(slugger.slug("Usage"), "usage");
        assert_eq!(slugger.slug("Usage"), "usage-1");
        assert_eq!(slugger.slug("Usage"), "usage-2");
        assert_eq!(slugger.slug("Usage 1"), "usage-1-1");
    }

    #[test]
    fn test_headings_get_ids() {
        let out = render("# Install\n\n## Build `cargo`\n\n## Install\n");
        assert!(out.html.contains("<h1 id=\"install\">Install</h1>"));
        assert!(out.html.contains("<h2 id=\"build-cargo\">"));
        assert!(out.html.contains("<h2 id=\"install-1\">Install</h2>"));
    }

    #[test]
    fn test_explicit_heading_id_wins() {
        let out = render("# Intro {#start}\n\n# Start\n");
        assert!(out.html.contains("<h1 id=\"start\">Intro</h1>"));
        assert!(out.html.contains("<h1 id=\"start-1\">Start</h1>"));
    }

    #[test]
    fn test_header_ids_disabled() {
        let (renderer, _) = renderer_with(RenderOptions {
            header_ids: false,
            ..RenderOptions::default()
        });
        let out = renderer.render("# Title\n");
        assert!(out.html.contains("<h1>Title</h1>"));
    }

    #[test]
    fn test_soft_breaks_become_br() {
        let out = render("first line\nsecond line\n");
        assert!(out.html.contains("first line<br"));

        let (renderer, _) = renderer_with(RenderOptions {
            breaks: false,
            ..RenderOptions::default()
        });
        assert!(!renderer.render("first line\nsecond line\n").html.contains("<br"));
    }

    #[test]
    fn test_gfm_extensions() {
        let out = render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n\n- [x] done\n");
        assert!(out.html.contains("<table>"));
        assert!(out.html.contains("<del>gone</del>"));
        assert!(out.html.contains("type=\"checkbox\""));
    }

    #[test]
    fn test_table_alignment_survives_sanitizing() {
        let out = render("| l | c | r |\n|:--|:-:|--:|\n| 1 | 2 | 3 |\n");
        assert!(out.html.contains(r#"<th style="text-align: left">l</th>"#));
        assert!(out.html.contains(r#"<th style="text-align: center">c</th>"#));
        assert!(out.html.contains(r#"<td style="text-align: right">3</td>"#));
    }

    #[test]
    fn test_other_cell_styles_are_stripped() {
        let out = render("<table><tr><td style=\"color: red\">x</td></tr></table>\n");
        assert!(out.html.contains("<td>x</td>"));
        assert!(!out.html.contains("color"));
    }

    #[test]
    fn test_every_code_block_highlighted_once() {
        let (renderer, highlighter) = renderer_with(RenderOptions::default());
        let markdown = "```rust\nfn a() {}\n```\n\ntext\n\n```\nplain\n```\n\n    indented\n";
        let out = renderer.render(markdown);

        assert_eq!(out.code_blocks, 3);
        assert_eq!(highlighter.calls.load(Ordering::SeqCst), 3);
        assert_eq!(out.html.matches("class=\"hl-mark\"").count(), 3);
        assert!(out.html.contains("<code class=\"hljs language-rust\"><span class=\"hl-mark\">[rust]fn a() {}\n</span>"));
        assert!(out.html.contains("<code class=\"hljs\"><span class=\"hl-mark\">[auto]plain\n</span>"));
    }

    #[test]
    fn test_fence_language_is_first_word() {
        let out = render("```python title=\"x.py\"\nprint(1)\n```\n");
        assert!(out.html.contains("language-python"));
        assert!(out.html.contains("[python]"));
    }

    #[test]
    fn test_raw_html_code_blocks_pass_through() {
        let (renderer, highlighter) = renderer_with(RenderOptions::default());
        let out = renderer.render("<pre><code>raw html</code></pre>\n");
        assert_eq!(out.code_blocks, 0);
        assert_eq!(highlighter.calls.load(Ordering::SeqCst), 0);
        assert!(out.html.contains("<pre><code>raw html</code></pre>"));
    }

    #[test]
    fn test_inline_code_is_not_highlighted() {
        let (renderer, highlighter) = renderer_with(RenderOptions::default());
        let out = renderer.render("use `x` here\n");
        assert_eq!(out.code_blocks, 0);
        assert_eq!(highlighter.calls.load(Ordering::SeqCst), 0);
        assert!(out.html.contains("<code>x</code>"));
    }

    #[test]
    fn test_sanitize_strips_scripts() {
        let out = render("hello <script>alert('x')</script>\n");
        assert!(!out.html.contains("<script"));

        let (renderer, _) = renderer_with(RenderOptions {
            sanitize: false,
            ..RenderOptions::default()
        });
        assert!(renderer.render("<b>raw</b>\n").html.contains("<b>raw</b>"));
    }

    #[test]
    fn test_autolinked_email_is_not_mangled() {
        let out = render("<someone@example.com>\n");
        assert!(out.html.contains("mailto:someone@example.com"));
        assert!(out.html.contains(">someone@example.com</a>"));
    }
}
