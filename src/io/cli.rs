//! Command-line front end over the catalogue, browser and puzzle engine

use crate::coloring::browser::{BrowserState, ColoringBrowser, UnselectedView};
use crate::coloring::index::CategoryIndex;
use crate::content::records::PuzzleImage;
use crate::content::repository::{Catalog, ContentRepository};
use crate::io::configuration::{DEFAULT_SEED, DEFAULT_UNSELECTED_VIEW};
use crate::io::error::Result;
use crate::io::image::{
    export_board, export_pieces, load_rgba, piece_dir_name, read_dimensions, resolve_source,
};
use crate::io::logging::{LogLevel, Logger, json_kv};
use crate::io::progress::SliceProgress;
use crate::puzzle::gallery::PuzzleGallery;
use crate::puzzle::geometry::{GridSize, Partition, Slot};
use crate::puzzle::session::PuzzleEngine;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "cli";

#[derive(Parser)]
#[command(name = "playcorner")]
#[command(
    author,
    version,
    about = "Browse coloring pages and play jigsaw puzzles from a content catalogue"
)]
/// Command-line arguments for the playcorner tool
pub struct Cli {
    /// Minimum level of JSON log lines written to stderr
    #[arg(short, long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Operations offered by the CLI
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the coloring category index
    Categories {
        /// Catalogue JSON file
        catalog: PathBuf,
    },

    /// List coloring pages for a category or subcategory
    Browse {
        /// Catalogue JSON file
        catalog: PathBuf,

        /// Category to open
        #[arg(short, long)]
        category: Option<String>,

        /// Subcategory to open (requires --category)
        #[arg(short, long)]
        subcategory: Option<String>,

        /// What to show when no category is given
        #[arg(long, value_enum, default_value_t = DEFAULT_UNSELECTED_VIEW)]
        unselected: UnselectedView,
    },

    /// List puzzle images
    Gallery {
        /// Catalogue JSON file
        catalog: PathBuf,
    },

    /// Deal a puzzle, apply moves and print the board
    Puzzle {
        /// Catalogue JSON file
        catalog: PathBuf,

        /// Puzzle image id
        image: String,

        /// Pieces per edge (3-5); defaults to the image's suggestion
        #[arg(short, long)]
        grid: Option<u8>,

        /// Random seed for a reproducible shuffle
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Move the piece on one slot to another, as `row,col:row,col`
        #[arg(short = 'm', long = "move", value_parser = parse_move)]
        moves: Vec<(Slot, Slot)>,

        /// Render the resulting board to this PNG path
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Cut every local puzzle image into piece PNGs
    Slice {
        /// Catalogue JSON file
        catalog: PathBuf,

        /// Directory receiving one sub-directory per image
        out_dir: PathBuf,

        /// Pieces per edge (3-5); defaults to each image's suggestion
        #[arg(short, long)]
        grid: Option<u8>,
    },
}

/// Parse a `row,col` slot
///
/// # Errors
///
/// Returns a message when the text is not two comma-separated integers
pub fn parse_slot(text: &str) -> std::result::Result<Slot, String> {
    let (row, col) = text
        .split_once(',')
        .ok_or_else(|| format!("expected row,col but got '{text}'"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("bad row in '{text}': {e}"))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("bad column in '{text}': {e}"))?;
    Ok(Slot::new(row, col))
}

/// Parse a `row,col:row,col` move
///
/// # Errors
///
/// Returns a message when either side is not a valid slot
pub fn parse_move(text: &str) -> std::result::Result<(Slot, Slot), String> {
    let (from, to) = text
        .split_once(':')
        .ok_or_else(|| format!("expected row,col:row,col but got '{text}'"))?;
    Ok((parse_slot(from)?, parse_slot(to)?))
}

/// Runs one parsed command against a catalogue
pub struct CommandRunner {
    cli: Cli,
    logger: Logger,
}

impl CommandRunner {
    /// Create a runner for parsed arguments
    pub const fn new(cli: Cli, logger: Logger) -> Self {
        Self { cli, logger }
    }

    /// Execute the command, writing human-readable output to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if the catalogue cannot be loaded, a lookup fails, a
    /// move is rejected or an image cannot be read or written
    pub fn run(&self, out: &mut impl Write) -> Result<()> {
        match &self.cli.command {
            Command::Categories { catalog } => self.categories(catalog, out),
            Command::Browse {
                catalog,
                category,
                subcategory,
                unselected,
            } => self.browse(
                catalog,
                category.as_deref(),
                subcategory.as_deref(),
                *unselected,
                out,
            ),
            Command::Gallery { catalog } => self.gallery(catalog, out),
            Command::Puzzle {
                catalog,
                image,
                grid,
                seed,
                moves,
                export,
            } => {
                let request = PuzzleRequest {
                    image_id: image,
                    grid: *grid,
                    seed: *seed,
                    moves,
                    export: export.as_deref(),
                };
                self.puzzle(catalog, &request, out)
            }
            Command::Slice {
                catalog,
                out_dir,
                grid,
            } => self.slice(catalog, out_dir, *grid, out),
        }
    }

    fn load(&self, catalog: &Path) -> Result<Catalog> {
        Catalog::load(catalog, &self.logger)
    }

    fn categories(&self, catalog: &Path, out: &mut impl Write) -> Result<()> {
        let items = self.load(catalog)?.coloring_list()?;
        let index = CategoryIndex::build(&items);

        let Ok(index) = index.ensure_not_empty() else {
            writeln!(out, "No coloring pages available.")?;
            return Ok(());
        };

        for category in index.categories() {
            writeln!(out, "{} ({})", category.name(), category.len())?;
            for bucket in category.buckets() {
                writeln!(out, "  {} ({})", bucket.name(), bucket.items().len())?;
            }
        }
        Ok(())
    }

    fn browse(
        &self,
        catalog: &Path,
        category: Option<&str>,
        subcategory: Option<&str>,
        unselected: UnselectedView,
        out: &mut impl Write,
    ) -> Result<()> {
        let items = self.load(catalog)?.coloring_list()?;
        let mut browser = ColoringBrowser::with_view(&items, unselected);

        if let Some(name) = category {
            if !browser.select_category(name) {
                writeln!(out, "No coloring pages in category '{name}'.")?;
                return Ok(());
            }
        }
        if let Some(name) = subcategory {
            browser.select_subcategory(name)?;
        }

        let visible = browser.visible_items();
        if visible.is_empty() && browser.state() == BrowserState::NoCategorySelected {
            let names: Vec<&str> = browser.index().category_names().collect();
            if names.is_empty() {
                writeln!(out, "No coloring pages available.")?;
            } else {
                writeln!(out, "Pick a category: {}", names.join(", "))?;
            }
            return Ok(());
        }

        for item in visible {
            writeln!(out, "{}\t{}\t{}", item.slug, item.title, item.image_url)?;
        }
        Ok(())
    }

    fn gallery(&self, catalog: &Path, out: &mut impl Write) -> Result<()> {
        let gallery = PuzzleGallery::fetch(&self.load(catalog)?)?;
        if gallery.is_empty() {
            writeln!(out, "No puzzles available.")?;
        }
        for image in gallery.list() {
            writeln!(out, "{}\t{}\t{}", image.id, image.label, image.grid_size)?;
        }
        Ok(())
    }

    fn puzzle(
        &self,
        catalog: &Path,
        request: &PuzzleRequest<'_>,
        out: &mut impl Write,
    ) -> Result<()> {
        let gallery = PuzzleGallery::fetch(&self.load(catalog)?)?;
        let image = self.with_local_dimensions(catalog, gallery.select(request.image_id)?);
        let grid = request.grid.map(GridSize::new).transpose()?;

        let engine = PuzzleEngine::new().with_logger(self.logger.clone());
        let mut session = engine.start(&image, grid.unwrap_or(image.grid_size), request.seed)?;

        for &(from, to) in request.moves {
            session.move_from(from, to)?;
        }

        writeln!(
            out,
            "{} ({}, seed {})",
            image.label,
            session.grid_size(),
            session.seed()
        )?;
        writeln!(out, "{session}")?;

        if let Some(path) = request.export {
            let source = load_rgba(&resolve_source(catalog, &image.source_url))?;
            export_board(&source, &session, path)?;
            writeln!(out, "Board written to {}", path.display())?;
        }
        Ok(())
    }

    // Catalogues often omit pixel sizes; local files report theirs from the header
    fn with_local_dimensions(&self, catalog: &Path, image: &PuzzleImage) -> PuzzleImage {
        let mut image = image.clone();
        if image.dimensions.is_none() {
            let path = resolve_source(catalog, &image.source_url);
            if path.is_file() {
                match read_dimensions(&path) {
                    Ok((width, height)) => image.dimensions = Some((width, height)),
                    Err(error) => self.logger.log_with_fields(
                        LogLevel::Warn,
                        LOG_TARGET,
                        "could not read image size",
                        [json_kv("reason", error.to_string())],
                    ),
                }
            }
        }
        image
    }

    fn slice(
        &self,
        catalog: &Path,
        out_dir: &Path,
        grid: Option<u8>,
        out: &mut impl Write,
    ) -> Result<()> {
        let gallery = PuzzleGallery::fetch(&self.load(catalog)?)?;
        let grid = grid.map(GridSize::new).transpose()?;

        let total = gallery.list().len();
        let mut progress = if self.cli.quiet {
            SliceProgress::hidden(total)
        } else {
            SliceProgress::new(total)
        };

        let mut sliced = 0;
        for image in gallery.list() {
            progress.start_image(&image.label);
            let dir_name = match piece_dir_name(&image.id) {
                Ok(name) => name,
                Err(error) => {
                    self.skip(&mut progress, &image.id, &error.to_string());
                    continue;
                }
            };
            let source_path = resolve_source(catalog, &image.source_url);
            if !source_path.is_file() {
                self.skip(&mut progress, &image.id, "not a local file");
                continue;
            }

            let source = load_rgba(&source_path)?;
            let partition =
                Partition::new(source.width(), source.height(), grid.unwrap_or(image.grid_size))?;
            export_pieces(&source, &partition, &out_dir.join(dir_name))?;
            sliced += 1;
            progress.complete_image();
        }

        progress.finish();
        writeln!(
            out,
            "Sliced {sliced} of {total} images ({} skipped)",
            progress.skipped()
        )?;
        Ok(())
    }

    fn skip(&self, progress: &mut SliceProgress, image_id: &str, reason: &str) {
        self.logger.log_with_fields(
            LogLevel::Warn,
            LOG_TARGET,
            "skipping puzzle image",
            [json_kv("image", image_id), json_kv("reason", reason)],
        );
        progress.skip_image();
    }
}

struct PuzzleRequest<'a> {
    image_id: &'a str,
    grid: Option<u8>,
    seed: u64,
    moves: &'a [(Slot, Slot)],
    export: Option<&'a Path>,
}
