//! Content interaction core for a children's activity site
//!
//! Builds a two-level category index over coloring pages, drives the
//! category browser, and runs seeded jigsaw puzzle sessions on images
//! picked from a gallery. Content arrives through a repository boundary
//! that validates records before the engines ever see them.

#![forbid(unsafe_code)]

/// Coloring catalogue indexing and browsing
pub mod coloring;
/// Content records and the repository boundary
pub mod content;
/// Input/output operations, configuration and error handling
pub mod io;
/// Jigsaw puzzle grid engine and gallery
pub mod puzzle;

pub use io::error::{PlayError, Result};
