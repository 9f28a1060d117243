//! Typed content records and their validation at the repository boundary
//!
//! Catalogue documents deserialize into `Raw*` shapes where every field is
//! optional. Conversion into the strict records rejects anything missing an
//! identifier, a slug, a title or a required URL, so the interactive engines
//! never see half-formed data.

use serde::Deserialize;

use crate::io::configuration::DEFAULT_GRID_SIZE;
use crate::io::error::{PlayError, Result};
use crate::puzzle::geometry::GridSize;

/// A printable coloring page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoringItem {
    /// Stable identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// URL-safe name
    pub slug: String,
    /// Top-level category label (free text)
    pub category: String,
    /// Second-level label, absent for uncategorised pages
    pub subcategory: Option<String>,
    /// Full-size image
    pub image_url: String,
    /// Preview image
    pub thumbnail_url: String,
}

/// A source image for the jigsaw game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleImage {
    /// Stable identifier
    pub id: String,
    /// Image location (URL or local path)
    pub source_url: String,
    /// Display label
    pub label: String,
    /// Suggested difficulty
    pub grid_size: GridSize,
    /// Pixel size (width, height), when the catalogue knows it
    pub dimensions: Option<(u32, u32)>,
}

/// A narrated story
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioStory {
    /// Stable identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// URL-safe name
    pub slug: String,
    /// Audio file location
    pub audio_url: String,
    /// Cover art, if any
    pub cover_url: Option<String>,
}

/// A readable book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Stable identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// URL-safe name
    pub slug: String,
    /// Document location
    pub file_url: String,
    /// Cover art, if any
    pub cover_url: Option<String>,
}

/// An embedded mini-game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    /// Stable identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// URL-safe name
    pub slug: String,
    /// Game entry point
    pub game_url: String,
    /// Preview image, if any
    pub thumbnail_url: Option<String>,
}

/// Unvalidated coloring record as found in a catalogue
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawColoringItem {
    /// Identifier
    pub id: Option<String>,
    /// Title
    pub title: Option<String>,
    /// Slug
    pub slug: Option<String>,
    /// Category label
    pub category: Option<String>,
    /// Subcategory label
    pub subcategory: Option<String>,
    /// Full-size image
    pub image_url: Option<String>,
    /// Preview image
    pub thumbnail_url: Option<String>,
}

/// Unvalidated puzzle record as found in a catalogue
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPuzzleImage {
    /// Identifier
    pub id: Option<String>,
    /// Image location
    pub source_url: Option<String>,
    /// Display label
    pub label: Option<String>,
    /// Suggested difficulty
    pub grid_size: Option<u8>,
    /// Pixel width
    pub width: Option<u32>,
    /// Pixel height
    pub height: Option<u32>,
}

/// Unvalidated audio story record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAudioStory {
    /// Identifier
    pub id: Option<String>,
    /// Title
    pub title: Option<String>,
    /// Slug
    pub slug: Option<String>,
    /// Audio location
    pub audio_url: Option<String>,
    /// Cover art
    pub cover_url: Option<String>,
}

/// Unvalidated book record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBook {
    /// Identifier
    pub id: Option<String>,
    /// Title
    pub title: Option<String>,
    /// Slug
    pub slug: Option<String>,
    /// Document location
    pub file_url: Option<String>,
    /// Cover art
    pub cover_url: Option<String>,
}

/// Unvalidated game record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGame {
    /// Identifier
    pub id: Option<String>,
    /// Title
    pub title: Option<String>,
    /// Slug
    pub slug: Option<String>,
    /// Game entry point
    pub game_url: Option<String>,
    /// Preview image
    pub thumbnail_url: Option<String>,
}

/// Conversion from a raw catalogue record into a validated one
pub trait Validate {
    /// Validated record type
    type Output;

    /// Collection name used in rejection reports
    const COLLECTION: &'static str;

    /// Check required fields and build the strict record
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` naming the first missing or invalid field
    fn validate(self, position: usize) -> Result<Self::Output>;
}

// Blank strings count as missing
fn required(
    value: Option<String>,
    collection: &'static str,
    position: usize,
    field: &'static str,
) -> Result<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(PlayError::MalformedRecord {
            collection,
            position,
            field,
        }),
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

impl Validate for RawColoringItem {
    type Output = ColoringItem;
    const COLLECTION: &'static str = "coloring";

    fn validate(self, position: usize) -> Result<ColoringItem> {
        let c = Self::COLLECTION;
        let id = required(self.id, c, position, "id")?;
        let title = required(self.title, c, position, "title")?;
        let slug = required(self.slug, c, position, "slug")?;
        let category = required(self.category, c, position, "category")?;
        let image_url = required(self.image_url, c, position, "imageUrl")?;
        let thumbnail_url = optional(self.thumbnail_url).unwrap_or_else(|| image_url.clone());

        Ok(ColoringItem {
            id,
            title,
            slug,
            category,
            subcategory: optional(self.subcategory),
            image_url,
            thumbnail_url,
        })
    }
}

impl Validate for RawPuzzleImage {
    type Output = PuzzleImage;
    const COLLECTION: &'static str = "puzzles";

    fn validate(self, position: usize) -> Result<PuzzleImage> {
        let c = Self::COLLECTION;
        let id = required(self.id, c, position, "id")?;
        let source_url = required(self.source_url, c, position, "sourceUrl")?;
        let label = optional(self.label).unwrap_or_else(|| id.clone());
        let grid_size = GridSize::new(self.grid_size.unwrap_or(DEFAULT_GRID_SIZE)).map_err(
            |_invalid| PlayError::MalformedRecord {
                collection: c,
                position,
                field: "gridSize",
            },
        )?;
        let dimensions = match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        };

        Ok(PuzzleImage {
            id,
            source_url,
            label,
            grid_size,
            dimensions,
        })
    }
}

impl Validate for RawAudioStory {
    type Output = AudioStory;
    const COLLECTION: &'static str = "audio";

    fn validate(self, position: usize) -> Result<AudioStory> {
        let c = Self::COLLECTION;
        Ok(AudioStory {
            id: required(self.id, c, position, "id")?,
            title: required(self.title, c, position, "title")?,
            slug: required(self.slug, c, position, "slug")?,
            audio_url: required(self.audio_url, c, position, "audioUrl")?,
            cover_url: optional(self.cover_url),
        })
    }
}

impl Validate for RawBook {
    type Output = Book;
    const COLLECTION: &'static str = "books";

    fn validate(self, position: usize) -> Result<Book> {
        let c = Self::COLLECTION;
        Ok(Book {
            id: required(self.id, c, position, "id")?,
            title: required(self.title, c, position, "title")?,
            slug: required(self.slug, c, position, "slug")?,
            file_url: required(self.file_url, c, position, "fileUrl")?,
            cover_url: optional(self.cover_url),
        })
    }
}

impl Validate for RawGame {
    type Output = Game;
    const COLLECTION: &'static str = "games";

    fn validate(self, position: usize) -> Result<Game> {
        let c = Self::COLLECTION;
        Ok(Game {
            id: required(self.id, c, position, "id")?,
            title: required(self.title, c, position, "title")?,
            slug: required(self.slug, c, position, "slug")?,
            game_url: required(self.game_url, c, position, "gameUrl")?,
            thumbnail_url: optional(self.thumbnail_url),
        })
    }
}

impl ColoringItem {
    /// Build a record directly, bypassing catalogue parsing
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        subcategory: Option<&str>,
    ) -> Self {
        let id = id.into();
        let image_url = format!("/coloring/{id}.png");
        Self {
            slug: id.clone(),
            thumbnail_url: image_url.clone(),
            image_url,
            title: title.into(),
            category: category.into(),
            subcategory: subcategory.map(str::to_string),
            id,
        }
    }
}

impl PuzzleImage {
    /// Build a record directly, bypassing catalogue parsing
    pub fn new(id: impl Into<String>, source_url: impl Into<String>, grid_size: GridSize) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            source_url: source_url.into(),
            grid_size,
            dimensions: None,
        }
    }

    /// Attach known pixel dimensions
    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some((width, height));
        self
    }
}
