//! Picking a source image before a puzzle session starts

use crate::content::records::PuzzleImage;
use crate::content::repository::ContentRepository;
use crate::io::error::{Result, not_found};
use crate::puzzle::geometry::GridSize;
use crate::puzzle::session::{PuzzleEngine, PuzzleSession};

/// Read-only list of puzzle images fetched once from the repository
#[derive(Debug, Clone, Default)]
pub struct PuzzleGallery {
    images: Vec<PuzzleImage>,
}

impl PuzzleGallery {
    /// Fetch the gallery from a content repository
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the repository
    pub fn fetch(repository: &impl ContentRepository) -> Result<Self> {
        Ok(Self::from_images(repository.puzzle_list()?))
    }

    /// Wrap already-fetched images
    pub const fn from_images(images: Vec<PuzzleImage>) -> Self {
        Self { images }
    }

    /// Every image, in repository order
    pub fn list(&self) -> &[PuzzleImage] {
        &self.images
    }

    /// Whether the gallery has nothing to offer
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Look up an image by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no image has this id
    pub fn select(&self, image_id: &str) -> Result<&PuzzleImage> {
        self.images
            .iter()
            .find(|image| image.id == image_id)
            .ok_or_else(|| not_found("puzzle image", &image_id))
    }

    /// Select an image and deal a session for it
    ///
    /// Uses the image's suggested difficulty unless `grid` overrides it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids, or any error from
    /// [`PuzzleEngine::start`]
    pub fn start_session(
        &self,
        engine: &PuzzleEngine,
        image_id: &str,
        grid: Option<GridSize>,
        seed: u64,
    ) -> Result<PuzzleSession> {
        let image = self.select(image_id)?;
        engine.start(image, grid.unwrap_or(image.grid_size), seed)
    }
}
