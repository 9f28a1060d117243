//! Runtime configuration defaults and fixed policies

use crate::coloring::browser::UnselectedView;

// Puzzle difficulty bounds
/// Smallest supported grid edge (pieces per row)
pub const MIN_GRID_SIZE: u8 = 3;
/// Largest supported grid edge (pieces per row)
pub const MAX_GRID_SIZE: u8 = 5;
/// Grid edge used when a catalogue record does not suggest one
pub const DEFAULT_GRID_SIZE: u8 = 3;

/// Fixed seed for reproducible shuffles
pub const DEFAULT_SEED: u64 = 42;

// An identity permutation of 9+ slots is vanishingly rare; the cap only
// guards against a broken random source
/// Maximum reshuffles before falling back to a rotation of the slots
pub const MAX_SHUFFLE_ATTEMPTS: usize = 64;

/// Bucket label for coloring items without a subcategory
pub const GENERAL_SUBCATEGORY: &str = "General";

/// What the coloring browser shows before a category is picked
pub const DEFAULT_UNSELECTED_VIEW: UnselectedView = UnselectedView::Prompt;

// Output settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Suffix added to per-image piece directories
pub const PIECES_SUFFIX: &str = "_pieces";
/// Pixel gap between pieces in exported board previews
pub const BOARD_GAP_PX: u32 = 4;
