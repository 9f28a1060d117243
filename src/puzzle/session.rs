//! Puzzle sessions: shuffled boards, piece moves and win detection
//!
//! A session owns one piece per grid cell. The board is kept twice, once as
//! the piece list (piece → slot) and once as an occupancy grid (slot → piece),
//! and both are updated inside a single `&mut self` call so no caller can
//! observe one half of a swap. A bitset of correctly placed pieces makes the
//! completion check a popcount instead of a scan.

use bitvec::prelude::*;
use ndarray::Array2;
use std::fmt;
use std::time::{Duration, Instant};

use crate::content::records::PuzzleImage;
use crate::io::error::{Result, invalid_parameter, not_found};
use crate::io::logging::{LogLevel, Logger, json_kv};
use crate::puzzle::geometry::{GridSize, Partition, Slot};
use crate::puzzle::shuffle::Shuffler;

const LOG_TARGET: &str = "puzzle::session";

/// Identifier of a piece; equal to the row-major position of its home slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub usize);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One cut of the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzlePiece {
    /// Piece identifier
    pub id: PieceId,
    /// Cell of the source image this piece was cut from
    pub index: Slot,
    /// Where the piece currently sits
    pub current_slot: Slot,
    /// Where the piece belongs
    pub correct_slot: Slot,
}

impl PuzzlePiece {
    /// Whether the piece sits on its home slot
    pub fn is_placed(&self) -> bool {
        self.current_slot == self.correct_slot
    }
}

/// Result of a successful move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece was dropped on its own slot; nothing changed
    Unchanged,
    /// The piece took the target slot and the occupant took its old one
    Swapped {
        /// Piece that was displaced
        displaced: PieceId,
        /// Completion state after the move
        completed: bool,
    },
}

/// Starts puzzle sessions that report to a shared logger
#[derive(Debug, Clone)]
pub struct PuzzleEngine {
    logger: Logger,
}

impl Default for PuzzleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleEngine {
    /// Engine with logging disabled
    pub fn new() -> Self {
        Self {
            logger: Logger::disabled(),
        }
    }

    /// Attach a logger to new sessions
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Start a shuffled session for `image`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the image has known dimensions smaller
    /// than the grid
    pub fn start(&self, image: &PuzzleImage, grid: GridSize, seed: u64) -> Result<PuzzleSession> {
        let partition = image
            .dimensions
            .map(|(width, height)| Partition::new(width, height, grid))
            .transpose()?;

        let mut session = PuzzleSession::unshuffled(
            image.id.clone(),
            grid,
            partition,
            Shuffler::new(seed),
            self.logger.clone(),
        );
        session.scatter();

        self.logger.log_with_fields(
            LogLevel::Info,
            LOG_TARGET,
            "puzzle session started",
            [
                json_kv("image", image.id.as_str()),
                json_kv("grid", grid.edge()),
                json_kv("seed", seed),
            ],
        );
        Ok(session)
    }
}

/// One player's active puzzle
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    image_id: String,
    grid: GridSize,
    partition: Option<Partition>,
    pieces: Vec<PuzzlePiece>,
    board: Array2<usize>,
    placed: BitVec,
    shuffler: Shuffler,
    started_at: Instant,
    moves: usize,
    completed: bool,
    logger: Logger,
}

impl PuzzleSession {
    fn unshuffled(
        image_id: String,
        grid: GridSize,
        partition: Option<Partition>,
        shuffler: Shuffler,
        logger: Logger,
    ) -> Self {
        let edge = grid.edge();
        let pieces = grid
            .slots()
            .enumerate()
            .map(|(i, slot)| PuzzlePiece {
                id: PieceId(i),
                index: slot,
                current_slot: slot,
                correct_slot: slot,
            })
            .collect();
        let board = Array2::from_shape_fn((edge, edge), |(row, col)| row * edge + col);

        Self {
            image_id,
            grid,
            partition,
            pieces,
            board,
            placed: bitvec![1; grid.piece_count()],
            shuffler,
            started_at: Instant::now(),
            moves: 0,
            completed: true,
            logger,
        }
    }

    // Assigns every piece a slot from a non-identity permutation
    fn scatter(&mut self) {
        let order = self.shuffler.permutation(self.grid.piece_count());
        let edge = self.grid.edge();

        for (piece, &target) in self.pieces.iter_mut().zip(order.iter()) {
            let slot = Slot::new(target / edge, target % edge);
            piece.current_slot = slot;
            if let Some(cell) = self.board.get_mut([slot.row, slot.col]) {
                *cell = piece.id.0;
            }
            self.placed.set(piece.id.0, slot == piece.correct_slot);
        }

        self.completed = self.placed.all();
    }

    /// Identifier of the source image
    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    /// Grid dimensions of this session
    pub const fn grid_size(&self) -> GridSize {
        self.grid
    }

    /// Pixel partition of the source image, when its size is known
    pub const fn partition(&self) -> Option<&Partition> {
        self.partition.as_ref()
    }

    /// Seed the session was shuffled from
    pub const fn seed(&self) -> u64 {
        self.shuffler.seed()
    }

    /// All pieces, ordered by id
    pub fn pieces(&self) -> &[PuzzlePiece] {
        &self.pieces
    }

    /// Look up a piece by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for ids outside the grid
    pub fn piece(&self, id: PieceId) -> Result<&PuzzlePiece> {
        self.pieces
            .get(id.0)
            .ok_or_else(|| not_found("puzzle piece", &id))
    }

    /// Piece currently sitting on `slot`, `None` when the slot is off the grid
    pub fn piece_at(&self, slot: Slot) -> Option<&PuzzlePiece> {
        self.board
            .get([slot.row, slot.col])
            .and_then(|&id| self.pieces.get(id))
    }

    /// Whether every piece sits on its home slot
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Number of pieces on their home slot
    pub fn correct_count(&self) -> usize {
        self.placed.count_ones()
    }

    /// Successful moves since the last shuffle
    pub const fn move_count(&self) -> usize {
        self.moves
    }

    /// When the current shuffle was dealt
    pub const fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Time since the current shuffle was dealt
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Drop piece `id` onto `target`
    ///
    /// Every slot always holds a piece, so the occupant of `target` takes the
    /// piece's old slot. Completion is recomputed after every effective move.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `target` lies outside the grid (`InvalidParameter`)
    /// - `id` does not name a piece (`NotFound`)
    pub fn move_piece(&mut self, id: PieceId, target: Slot) -> Result<MoveOutcome> {
        if !self.grid.contains(target) {
            return Err(invalid_parameter(
                "target",
                &target,
                &format!("outside the {} grid", self.grid),
            ));
        }

        let from = self.piece(id)?.current_slot;
        if from == target {
            return Ok(MoveOutcome::Unchanged);
        }

        let displaced = self
            .piece_at(target)
            .map(|piece| piece.id)
            .ok_or_else(|| not_found("piece at slot", &target))?;

        self.place(id, target);
        self.place(displaced, from);
        self.moves += 1;

        let was_completed = self.completed;
        self.completed = self.placed.all();
        if self.completed && !was_completed {
            self.logger.log_with_fields(
                LogLevel::Info,
                LOG_TARGET,
                "puzzle completed",
                [
                    json_kv("image", self.image_id.as_str()),
                    json_kv("moves", self.moves),
                    json_kv("elapsed_ms", self.elapsed().as_millis() as u64),
                ],
            );
        }

        Ok(MoveOutcome::Swapped {
            displaced,
            completed: self.completed,
        })
    }

    /// Move whatever piece sits on `from` to `to`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `from` is off the grid, otherwise the
    /// same errors as [`Self::move_piece`]
    pub fn move_from(&mut self, from: Slot, to: Slot) -> Result<MoveOutcome> {
        let id = self
            .piece_at(from)
            .map(|piece| piece.id)
            .ok_or_else(|| {
                invalid_parameter("from", &from, &format!("outside the {} grid", self.grid))
            })?;
        self.move_piece(id, to)
    }

    /// Deal a fresh shuffle from the session's random stream
    pub fn reset(&mut self) {
        self.scatter();
        self.moves = 0;
        self.started_at = Instant::now();

        self.logger.log_with_fields(
            LogLevel::Debug,
            LOG_TARGET,
            "puzzle session reshuffled",
            [json_kv("image", self.image_id.as_str())],
        );
    }

    fn place(&mut self, id: PieceId, slot: Slot) {
        if let Some(piece) = self.pieces.get_mut(id.0) {
            piece.current_slot = slot;
            self.placed.set(id.0, slot == piece.correct_slot);
        }
        if let Some(cell) = self.board.get_mut([slot.row, slot.col]) {
            *cell = id.0;
        }
    }
}

impl fmt::Display for PuzzleSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.grid.piece_count().to_string().len();
        for row in self.board.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|&id| format!("{:>width$}", id + 1))
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        write!(
            f,
            "{}/{} placed, {} moves{}",
            self.correct_count(),
            self.grid.piece_count(),
            self.moves,
            if self.completed { ", solved" } else { "" }
        )
    }
}
