//! Grid coordinates, difficulty bounds and image partitioning

use std::fmt;

use crate::io::configuration::{MAX_GRID_SIZE, MIN_GRID_SIZE};
use crate::io::error::{Result, invalid_parameter};

/// Number of pieces along each edge of a puzzle
///
/// Always within `MIN_GRID_SIZE..=MAX_GRID_SIZE`, so a session can never be
/// built on a grid small enough to be trivially solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridSize(u8);

impl GridSize {
    /// Validate a grid edge length
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when `size` is outside the supported range
    pub fn new(size: u8) -> Result<Self> {
        if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            Ok(Self(size))
        } else {
            Err(invalid_parameter(
                "grid_size",
                &size,
                &format!("must be between {MIN_GRID_SIZE} and {MAX_GRID_SIZE}"),
            ))
        }
    }

    /// Pieces per row (and per column)
    pub const fn edge(self) -> usize {
        self.0 as usize
    }

    /// Total number of pieces
    pub const fn piece_count(self) -> usize {
        self.edge() * self.edge()
    }

    /// All slots in row-major order
    pub fn slots(self) -> impl Iterator<Item = Slot> {
        let edge = self.edge();
        (0..edge * edge).map(move |i| Slot::new(i / edge, i % edge))
    }

    /// Whether `slot` lies on this grid
    pub const fn contains(self, slot: Slot) -> bool {
        slot.row < self.edge() && slot.col < self.edge()
    }

    /// Row-major position of `slot`
    pub const fn linear(self, slot: Slot) -> usize {
        slot.row * self.edge() + slot.col
    }
}

impl From<GridSize> for u8 {
    fn from(size: GridSize) -> Self {
        size.0
    }
}

impl TryFrom<u8> for GridSize {
    type Error = crate::io::error::PlayError;

    fn try_from(size: u8) -> Result<Self> {
        Self::new(size)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.0)
    }
}

/// A (row, column) position on the puzzle board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    /// Zero-based row
    pub row: usize,
    /// Zero-based column
    pub col: usize,
}

impl Slot {
    /// Create a slot
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Slot {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Pixel rectangle cut from the source image for one piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceBounds {
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Equal-area partition of an image into `grid × grid` rectangles
///
/// Dimensions that do not divide evenly lose their remainder, split between
/// both edges, so every piece has identical size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    grid: GridSize,
    piece_width: u32,
    piece_height: u32,
    origin: (u32, u32),
}

impl Partition {
    /// Compute the partition for an image of `width × height` pixels
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is smaller than the grid
    pub fn new(width: u32, height: u32, grid: GridSize) -> Result<Self> {
        let edge = grid.edge() as u32;
        if width < edge || height < edge {
            return Err(invalid_parameter(
                "dimensions",
                &format!("{width}x{height}"),
                &format!("image must be at least {edge} pixels on each side"),
            ));
        }

        let piece_width = width / edge;
        let piece_height = height / edge;
        let origin = ((width % edge) / 2, (height % edge) / 2);

        Ok(Self {
            grid,
            piece_width,
            piece_height,
            origin,
        })
    }

    /// Grid this partition was built for
    pub const fn grid(&self) -> GridSize {
        self.grid
    }

    /// Size shared by every piece (width, height)
    pub const fn piece_size(&self) -> (u32, u32) {
        (self.piece_width, self.piece_height)
    }

    /// Pixel rectangle for a slot, `None` when the slot is off the grid
    pub fn bounds(&self, slot: Slot) -> Option<PieceBounds> {
        self.grid.contains(slot).then(|| PieceBounds {
            x: self.origin.0 + slot.col as u32 * self.piece_width,
            y: self.origin.1 + slot.row as u32 * self.piece_height,
            width: self.piece_width,
            height: self.piece_height,
        })
    }

    /// Rectangles for every slot in row-major order
    pub fn all_bounds(&self) -> Vec<(Slot, PieceBounds)> {
        self.grid
            .slots()
            .filter_map(|slot| self.bounds(slot).map(|b| (slot, b)))
            .collect()
    }
}
