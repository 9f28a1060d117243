//! Source image probing, piece cutting and board preview export

use image::imageops::{crop_imm, overlay};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

use crate::io::configuration::{BOARD_GAP_PX, PIECES_SUFFIX};
use crate::io::error::{PlayError, Result, invalid_parameter};
use crate::puzzle::geometry::{Partition, Slot};
use crate::puzzle::session::PuzzleSession;

const BOARD_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Read only the pixel size of an image file
///
/// # Errors
///
/// Returns `ImageLoad` if the file is missing or not a decodable image
pub fn read_dimensions(path: &Path) -> Result<(u32, u32)> {
    image::image_dimensions(path).map_err(|source| PlayError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode an image file into RGBA pixels
///
/// # Errors
///
/// Returns `ImageLoad` if the file is missing or not a decodable image
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    image::open(path)
        .map(|decoded| decoded.to_rgba8())
        .map_err(|source| PlayError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })
}

/// Cut the source into one image per slot, in row-major order
pub fn cut_pieces(source: &RgbaImage, partition: &Partition) -> Vec<(Slot, RgbaImage)> {
    partition
        .all_bounds()
        .into_iter()
        .map(|(slot, b)| (slot, crop_imm(source, b.x, b.y, b.width, b.height).to_image()))
        .collect()
}

/// File name used for the piece cut from `slot`
pub fn piece_file_name(slot: Slot) -> String {
    format!("piece_r{}_c{}.png", slot.row, slot.col)
}

/// Directory name holding the pieces of one image
///
/// # Errors
///
/// Returns `InvalidParameter` if the id is empty, is `.` or `..`, or contains a
/// path separator, since the name is joined onto a caller-chosen directory
pub fn piece_dir_name(image_id: &str) -> Result<String> {
    let trimmed = image_id.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || image_id.contains(['/', '\\'])
    {
        return Err(invalid_parameter(
            "image_id",
            &image_id,
            &"must be a single path component",
        ));
    }
    Ok(format!("{image_id}{PIECES_SUFFIX}"))
}

/// Resolve an image location from a catalogue entry
///
/// Relative paths are taken relative to the directory holding the catalogue
/// file; absolute paths are used as given.
pub fn resolve_source(catalog: &Path, source_url: &str) -> PathBuf {
    let source = Path::new(source_url);
    match catalog.parent() {
        Some(base) if source.is_relative() => base.join(source),
        _ => source.to_path_buf(),
    }
}

/// Write every piece of `source` into `out_dir`
///
/// # Errors
///
/// Returns an error if:
/// - The output directory cannot be created
/// - A piece image cannot be saved
pub fn export_pieces(
    source: &RgbaImage,
    partition: &Partition,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir).map_err(|e| PlayError::FileSystem {
        path: out_dir.to_path_buf(),
        operation: "create directory",
        source: e,
    })?;

    let mut written = Vec::new();
    for (slot, piece) in cut_pieces(source, partition) {
        let path = out_dir.join(piece_file_name(slot));
        piece.save(&path).map_err(|e| PlayError::ImageExport {
            path: path.clone(),
            source: e,
        })?;
        written.push(path);
    }
    Ok(written)
}

/// Compose the session's current arrangement into a single image
///
/// Each slot shows the piece currently sitting on it, separated by a thin
/// gap so misplaced pieces are easy to spot.
///
/// # Errors
///
/// Returns `InvalidParameter` if `source` is smaller than the session grid
pub fn render_board(source: &RgbaImage, session: &PuzzleSession) -> Result<RgbaImage> {
    let partition = Partition::new(source.width(), source.height(), session.grid_size())?;
    let (piece_w, piece_h) = partition.piece_size();
    let edge = session.grid_size().edge() as u32;

    let width = edge * piece_w + (edge + 1) * BOARD_GAP_PX;
    let height = edge * piece_h + (edge + 1) * BOARD_GAP_PX;
    let mut canvas = RgbaImage::from_pixel(width, height, BOARD_BACKGROUND);

    for slot in session.grid_size().slots() {
        let Some(piece) = session.piece_at(slot) else {
            continue;
        };
        let Some(b) = partition.bounds(piece.correct_slot) else {
            continue;
        };
        let tile = crop_imm(source, b.x, b.y, b.width, b.height).to_image();
        let dx = BOARD_GAP_PX + slot.col as u32 * (piece_w + BOARD_GAP_PX);
        let dy = BOARD_GAP_PX + slot.row as u32 * (piece_h + BOARD_GAP_PX);
        overlay(&mut canvas, &tile, i64::from(dx), i64::from(dy));
    }

    Ok(canvas)
}

/// Render the board and save it as PNG
///
/// # Errors
///
/// Returns an error if:
/// - `source` is smaller than the session grid
/// - The parent directory cannot be created
/// - The image cannot be saved to `output_path`
pub fn export_board(source: &RgbaImage, session: &PuzzleSession, output_path: &Path) -> Result<()> {
    let board = render_board(source, session)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PlayError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    board.save(output_path).map_err(|e| PlayError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })
}
