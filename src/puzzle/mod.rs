//! Jigsaw puzzle gameplay
//!
//! This module contains the puzzle engine including:
//! - Grid sizing and image partitioning
//! - Seeded shuffling
//! - Session state, moves and completion
//! - Gallery lookup of source images

/// Puzzle gallery selection
pub mod gallery;
/// Grid coordinates and image partitioning
pub mod geometry;
/// Session state, piece moves and win detection
pub mod session;
/// Reproducible slot permutations
pub mod shuffle;

pub use geometry::{GridSize, Slot};
pub use session::{MoveOutcome, PieceId, PuzzleEngine, PuzzleSession};
