//! Syntax highlighting for fenced code blocks.
//!
//! The renderer only knows the [`CodeHighlighter`] callback. The syntect
//! implementation emits classed spans (`hl-` prefix) and ships the theme as a
//! stylesheet, so the highlighted markup survives sanitization.

use crate::error::{AppError, HighlightError};
use crate::markdown::html_escape;
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

pub const DEFAULT_THEME: &str = "InspiredGitHub";

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Fence names syntect does not know under the same token.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("shell", "sh"),
    ("zsh", "sh"),
    ("console", "sh"),
    ("yml", "yaml"),
    ("c++", "cpp"),
    ("golang", "go"),
    ("jsonc", "json"),
    ("md", "markdown"),
    ("htm", "html"),
];

/// Called once per code block; returns the inner HTML of its `<code>` element.
pub trait CodeHighlighter: Send + Sync {
    fn highlight(&self, code: &str, lang: Option<&str>) -> String;
}

pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme_name: String,
    theme_css: String,
}

impl SyntectHighlighter {
    pub fn new(theme_name: &str) -> Result<Self, AppError> {
        let theme_set = ThemeSet::load_defaults();
        let theme = theme_set
            .themes
            .get(theme_name)
            .ok_or_else(|| AppError::UnknownTheme(theme_name.to_string()))?;
        let theme_css = css_for_theme_with_class_style(theme, CLASS_STYLE)?;

        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_name: theme_name.to_string(),
            theme_css,
        })
    }

    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }

    /// Stylesheet for the `hl-` classes of the configured theme.
    pub fn theme_css(&self) -> &str {
        &self.theme_css
    }

    /// Resolve a fence language by name, token or extension, ignoring case.
    pub fn get_language(&self, lang: &str) -> Option<&SyntaxReference> {
        let lang = lang.trim().to_lowercase();
        if lang.is_empty() {
            return None;
        }
        let token = LANGUAGE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == lang)
            .map(|(_, token)| *token)
            .unwrap_or(lang.as_str());

        self.syntax_set
            .find_syntax_by_token(token)
            .or_else(|| self.syntax_set.find_syntax_by_extension(token))
    }

    pub fn highlight_language(
        &self,
        code: &str,
        syntax: &SyntaxReference,
    ) -> Result<String, HighlightError> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }

    /// Guess the syntax from the first line (shebang, `<?php`, `<?xml`, ...),
    /// falling back to plain text.
    pub fn detect_language(&self, code: &str) -> &SyntaxReference {
        code.lines()
            .next()
            .and_then(|first| self.syntax_set.find_syntax_by_first_line(first))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    pub fn highlight_auto(&self, code: &str) -> Result<String, HighlightError> {
        let syntax = self.detect_language(code);
        self.highlight_language(code, syntax)
    }
}

impl CodeHighlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let syntax = lang.and_then(|lang| {
            let syntax = self.get_language(lang);
            if syntax.is_none() {
                log::debug!("no syntax for '{}', auto-detecting", lang);
            }
            syntax
        });

        with_fallback(
            code,
            syntax.map(|syntax| move || self.highlight_language(code, syntax)),
            || self.highlight_auto(code),
        )
    }
}

/// By language when one resolved, else (or on error) auto-detect, else the
/// escaped raw code.
fn with_fallback<L, A>(code: &str, by_language: Option<L>, auto: A) -> String
where
    L: FnOnce() -> Result<String, HighlightError>,
    A: FnOnce() -> Result<String, HighlightError>,
{
    if let Some(by_language) = by_language {
        match by_language() {
            Ok(html) => return html,
            Err(e) => log::error!("Highlight error: {}", e),
        }
    }

    match auto() {
        Ok(html) => html,
        Err(e) => {
            log::error!("Auto-highlight error: {}", e);
            html_escape(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlighter() -> SyntectHighlighter {
        SyntectHighlighter::new(DEFAULT_THEME).unwrap()
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        let result = SyntectHighlighter::new("no-such-theme");
        assert!(matches!(result, Err(AppError::UnknownTheme(_))));
    }

    #[test]
    fn test_theme_css_uses_prefixed_classes() {
        let h = highlighter();
        assert_eq!(h.theme_name(), DEFAULT_THEME);
        assert!(h.theme_css().contains(".hl-"));
    }

    #[test]
    fn test_get_language_by_token_extension_and_alias() {
        let h = highlighter();
        assert_eq!(h.get_language("rust").unwrap().name, "Rust");
        assert_eq!(h.get_language("RS").unwrap().name, "Rust");
        assert_eq!(h.get_language("py").unwrap().name, "Python");
        assert_eq!(h.get_language("yml").unwrap().name, "YAML");
        assert!(h.get_language("golang").is_some());
        assert!(h.get_language("not-a-language").is_none());
        assert!(h.get_language("  ").is_none());
    }

    #[test]
    fn test_highlight_language_emits_classed_spans() {
        let h = highlighter();
        let syntax = h.get_language("rust").unwrap();
        let html = h.highlight_language("fn main() {}\n", syntax).unwrap();
        assert!(html.contains("<span class=\"hl-"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_detect_language_from_shebang() {
        let h = highlighter();
        let syntax = h.detect_language("#!/usr/bin/env python\nprint('hi')\n");
        assert_eq!(syntax.name, "Python");

        let plain = h.detect_language("just some words\n");
        assert_eq!(plain.name, "Plain Text");
    }

    #[test]
    fn test_highlight_escapes_markup_in_code() {
        let h = highlighter();
        let html = h.highlight("<script>alert(1)</script>\n", None);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_highlight_unknown_language_falls_back_to_auto() {
        let h = highlighter();
        let html = h.highlight("a < b\n", Some("klingon"));
        assert!(html.contains("a &lt; b"));
    }

    fn failing() -> Result<String, HighlightError> {
        Err(HighlightError::from(syntect::Error::Fmt(std::fmt::Error)))
    }

    #[test]
    fn test_language_error_falls_through_to_auto() {
        let html = with_fallback("a < b\n", Some(failing), || Ok("auto".to_string()));
        assert_eq!(html, "auto");
    }

    #[test]
    fn test_auto_error_falls_back_to_escaped_code() {
        let html = with_fallback("a < b\n", Some(failing), failing);
        assert_eq!(html, "a &lt; b\n");

        let html = with_fallback("<x>", None::<fn() -> Result<String, HighlightError>>, failing);
        assert_eq!(html, "&lt;x&gt;");
    }

    #[test]
    fn test_language_success_skips_auto() {
        let html = with_fallback(
            "code",
            Some(|| Ok("by-language".to_string())),
            || -> Result<String, HighlightError> { panic!("auto-detect should not run") },
        );
        assert_eq!(html, "by-language");
    }
}
