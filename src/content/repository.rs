//! Content repository boundary and the JSON-backed catalogue

use serde::Deserialize;
use std::path::Path;

use crate::content::records::{
    AudioStory, Book, ColoringItem, Game, PuzzleImage, RawAudioStory, RawBook, RawColoringItem,
    RawGame, RawPuzzleImage, Validate,
};
use crate::io::error::{PlayError, Result};
use crate::io::logging::{LogLevel, Logger, json_kv};

const LOG_TARGET: &str = "content::repository";

/// Source of typed content collections
///
/// Implementations resolve their data before interactive use; the engines
/// only ever see the returned in-memory records.
pub trait ContentRepository {
    /// All coloring pages
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read
    fn coloring_list(&self) -> Result<Vec<ColoringItem>>;

    /// All puzzle source images
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read
    fn puzzle_list(&self) -> Result<Vec<PuzzleImage>>;

    /// All audio stories
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read
    fn audio_stories(&self) -> Result<Vec<AudioStory>>;

    /// All books
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read
    fn books(&self) -> Result<Vec<Book>>;

    /// All mini-games
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read
    fn games(&self) -> Result<Vec<Game>>;
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCatalog {
    coloring: Vec<RawColoringItem>,
    puzzles: Vec<RawPuzzleImage>,
    audio: Vec<RawAudioStory>,
    books: Vec<RawBook>,
    games: Vec<RawGame>,
}

/// In-memory snapshot of every content collection
#[derive(Debug, Default)]
pub struct Catalog {
    coloring: Vec<ColoringItem>,
    puzzles: Vec<PuzzleImage>,
    audio: Vec<AudioStory>,
    books: Vec<Book>,
    games: Vec<Game>,
    rejections: Vec<PlayError>,
}

impl Catalog {
    /// Empty catalogue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the coloring collection
    #[must_use]
    pub fn with_coloring(mut self, items: Vec<ColoringItem>) -> Self {
        self.coloring = items;
        self
    }

    /// Replace the puzzle collection
    #[must_use]
    pub fn with_puzzles(mut self, images: Vec<PuzzleImage>) -> Self {
        self.puzzles = images;
        self
    }

    /// Parse a catalogue document
    ///
    /// Records failing validation are dropped, logged at `warn` and kept in
    /// [`Self::rejections`]; the rest of the document still loads.
    ///
    /// # Errors
    ///
    /// Returns `Catalog` if the document is not valid JSON of the expected shape
    pub fn from_json_str(json: &str, origin: &str, logger: &Logger) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(json).map_err(|source| PlayError::Catalog {
            origin: origin.to_string(),
            source,
        })?;

        let mut rejections = Vec::new();
        let coloring = ingest(raw.coloring, &mut rejections, logger);
        let puzzles = ingest(raw.puzzles, &mut rejections, logger);
        let audio = ingest(raw.audio, &mut rejections, logger);
        let books = ingest(raw.books, &mut rejections, logger);
        let games = ingest(raw.games, &mut rejections, logger);

        logger.log_with_fields(
            LogLevel::Info,
            LOG_TARGET,
            "catalogue loaded",
            [
                json_kv("origin", origin),
                json_kv("coloring", coloring.len()),
                json_kv("puzzles", puzzles.len()),
                json_kv("audio", audio.len()),
                json_kv("books", books.len()),
                json_kv("games", games.len()),
                json_kv("rejected", rejections.len()),
            ],
        );

        Ok(Self {
            coloring,
            puzzles,
            audio,
            books,
            games,
            rejections,
        })
    }

    /// Read and parse a catalogue file
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be read, or `Catalog` if it
    /// cannot be parsed
    pub fn load(path: &Path, logger: &Logger) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| PlayError::FileSystem {
            path: path.to_path_buf(),
            operation: "read catalogue",
            source,
        })?;
        Self::from_json_str(&json, &path.display().to_string(), logger)
    }

    /// Records dropped during ingestion
    pub fn rejections(&self) -> &[PlayError] {
        &self.rejections
    }
}

fn ingest<R: Validate>(
    raw: Vec<R>,
    rejections: &mut Vec<PlayError>,
    logger: &Logger,
) -> Vec<R::Output> {
    let mut accepted = Vec::with_capacity(raw.len());
    for (position, record) in raw.into_iter().enumerate() {
        match record.validate(position) {
            Ok(valid) => accepted.push(valid),
            Err(error) => {
                logger.log_with_fields(
                    LogLevel::Warn,
                    LOG_TARGET,
                    "record rejected",
                    [
                        json_kv("collection", R::COLLECTION),
                        json_kv("reason", error.to_string()),
                    ],
                );
                rejections.push(error);
            }
        }
    }
    accepted
}

impl ContentRepository for Catalog {
    fn coloring_list(&self) -> Result<Vec<ColoringItem>> {
        Ok(self.coloring.clone())
    }

    fn puzzle_list(&self) -> Result<Vec<PuzzleImage>> {
        Ok(self.puzzles.clone())
    }

    fn audio_stories(&self) -> Result<Vec<AudioStory>> {
        Ok(self.audio.clone())
    }

    fn books(&self) -> Result<Vec<Book>> {
        Ok(self.books.clone())
    }

    fn games(&self) -> Result<Vec<Game>> {
        Ok(self.games.clone())
    }
}
