//! HTML templates and styling for the preview page.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants
//! - `components` - Page elements, tab bar and tab script
//! - `viewer` - The full preview document

mod components;
mod styles;
mod viewer;

pub use components::{element_html, tab_bar, tab_script};
pub use styles::STYLE;
pub use viewer::render_viewer;
