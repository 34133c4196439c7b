//! Data structures for the preview page.
//!
//! The page is modelled as the four elements the loader and tab controller
//! address by id. Templates turn a [`Page`] into HTML; nothing else about the
//! document structure is tracked here.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Element Ids
// ============================================================================

pub const OUTPUT_ID: &str = "markdown-output";
pub const SOURCE_ID: &str = "markdown-source";
pub const PREVIEW_TAB_ID: &str = "preview-tab";
pub const SOURCE_TAB_ID: &str = "source-tab";

/// Class carried by the visible container and its control.
pub const ACTIVE_CLASS: &str = "active";

// ============================================================================
// Class List
// ============================================================================

/// Ordered set of CSS classes, mirroring `Element.classList`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn new(classes: &[&str]) -> Self {
        let mut list = Self::default();
        for class in classes {
            list.add(class);
        }
        list
    }

    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.0.retain(|c| c != class);
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

// ============================================================================
// Elements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Empty,
    /// Trusted markup, inserted as-is.
    Html(String),
    /// Plain text, escaped on output.
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Element {
    pub id: &'static str,
    pub classes: ClassList,
    pub content: Content,
}

impl Element {
    pub fn new(id: &'static str, classes: &[&str]) -> Self {
        Self {
            id,
            classes: ClassList::new(classes),
            content: Content::Empty,
        }
    }

    pub fn is_active(&self) -> bool {
        self.classes.contains(ACTIVE_CLASS)
    }
}

/// The four addressed elements of the preview page.
///
/// `source`, `preview_tab` and `source_tab` are `None` in the single
/// container variant.
#[derive(Debug, Clone)]
pub struct Page {
    pub output: Element,
    pub source: Option<Element>,
    pub preview_tab: Option<Element>,
    pub source_tab: Option<Element>,
}

impl Page {
    /// Page with the preview pair marked active, as the markup does by default.
    pub fn with_tabs() -> Self {
        Self {
            output: Element::new(OUTPUT_ID, &["tab-pane", "markdown-body", ACTIVE_CLASS]),
            source: Some(Element::new(SOURCE_ID, &["tab-pane", "source-view"])),
            preview_tab: Some(Element::new(PREVIEW_TAB_ID, &["tab-btn", ACTIVE_CLASS])),
            source_tab: Some(Element::new(SOURCE_TAB_ID, &["tab-btn"])),
        }
    }

    pub fn single() -> Self {
        Self {
            output: Element::new(OUTPUT_ID, &["markdown-body"]),
            source: None,
            preview_tab: None,
            source_tab: None,
        }
    }

    pub fn new(tabs: bool) -> Self {
        if tabs {
            Self::with_tabs()
        } else {
            Self::single()
        }
    }

    pub fn has_tabs(&self) -> bool {
        self.source.is_some() && self.preview_tab.is_some() && self.source_tab.is_some()
    }
}

// ============================================================================
// Tabs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Preview,
    Source,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Preview => "preview",
            Tab::Source => "source",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "preview" => Ok(Tab::Preview),
            "source" => Ok(Tab::Source),
            other => Err(format!("unknown tab '{}' (expected preview or source)", other)),
        }
    }
}

// ============================================================================
// Load Report
// ============================================================================

#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded { bytes: usize, code_blocks: usize },
    Failed { message: String },
}

/// What one run of the loader did. The page itself carries the content.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub outcome: LoadOutcome,
    pub loaded_at: DateTime<Utc>,
}

impl LoadReport {
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, LoadOutcome::Loaded { .. })
    }
}
