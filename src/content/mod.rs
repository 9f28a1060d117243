//! Content records and the repository they are fetched from

/// Typed records and boundary validation
pub mod records;
/// Repository trait and the catalogue implementation
pub mod repository;

pub use records::{AudioStory, Book, ColoringItem, Game, PuzzleImage};
pub use repository::{Catalog, ContentRepository};
