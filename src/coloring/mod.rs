//! Coloring page catalogue browsing

/// Category/subcategory selection state machine
pub mod browser;
/// Two-level category index
pub mod index;

pub use browser::{BrowserSelection, BrowserState, ColoringBrowser, UnselectedView};
pub use index::CategoryIndex;
