//! Preview/source tab switching.
//!
//! Tab state lives entirely in the `active` class of the four page elements.
//! Selecting a tab activates its control and container and always clears the
//! other pair, so exactly one pair is active afterwards.

use crate::models::{Page, Tab, ACTIVE_CLASS};

/// Make `tab` the visible one. Selecting the already active tab changes nothing.
pub fn select(page: &mut Page, tab: Tab) {
    if !page.has_tabs() {
        log::debug!("ignoring tab selection '{}' on a page without tabs", tab);
        return;
    }

    let show_preview = tab == Tab::Preview;

    let pairs = [
        (page.preview_tab.as_mut(), show_preview),
        (page.source_tab.as_mut(), !show_preview),
        (page.source.as_mut(), !show_preview),
    ];
    for (element, active) in pairs {
        if let Some(element) = element {
            if active {
                element.classes.add(ACTIVE_CLASS);
            } else {
                element.classes.remove(ACTIVE_CLASS);
            }
        }
    }

    if show_preview {
        page.output.classes.add(ACTIVE_CLASS);
    } else {
        page.output.classes.remove(ACTIVE_CLASS);
    }
}

/// The tab whose control and container are both active, if any.
pub fn active_tab(page: &Page) -> Option<Tab> {
    let preview_tab = page.preview_tab.as_ref()?;
    let source_tab = page.source_tab.as_ref()?;
    let source = page.source.as_ref()?;

    match (
        preview_tab.is_active() && page.output.is_active(),
        source_tab.is_active() && source.is_active(),
    ) {
        (true, false) => Some(Tab::Preview),
        (false, true) => Some(Tab::Source),
        _ => None,
    }
}
