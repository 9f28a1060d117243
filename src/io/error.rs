//! Error types shared by the browsing, gallery and puzzle operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all content interaction operations
///
/// Every variant is a local, recoverable condition. Callers surface them to
/// the presentation layer as values; none of them is fatal to the process.
#[derive(Debug)]
pub enum PlayError {
    /// Lookup on an id or label that does not exist
    NotFound {
        /// What kind of thing was looked up ("puzzle image", "subcategory", ...)
        kind: &'static str,
        /// The key that failed to match
        key: String,
    },

    /// State machine call made from a state that forbids it
    InvalidTransition {
        /// Operation that was attempted
        operation: &'static str,
        /// Name of the state the machine was in
        state: &'static str,
    },

    /// Puzzle move onto a slot held by another piece while swapping is disabled
    ///
    /// The bundled engine always swaps on drop and never returns this; it is
    /// kept for hosts that drive a board without swapping.
    OccupiedSlot {
        /// Target slot (row, col)
        slot: (usize, usize),
        /// Piece currently holding the slot
        occupant: usize,
    },

    /// Category index built from zero items
    ///
    /// Not a failure of the build itself; callers use it to render an
    /// explicit empty state.
    EmptySource,

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Content record rejected at the repository boundary
    MalformedRecord {
        /// Collection the record came from ("coloring", "puzzles", ...)
        collection: &'static str,
        /// Position of the record within its collection
        position: usize,
        /// Missing or invalid field
        field: &'static str,
    },

    /// Catalogue document could not be parsed
    Catalog {
        /// Where the document came from
        origin: String,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to read a source image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to write a rendered image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Failed to write command output
    Output {
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { kind, key } => write!(f, "No {kind} found for '{key}'"),
            Self::InvalidTransition { operation, state } => {
                write!(f, "Cannot {operation} while in state {state}")
            }
            Self::OccupiedSlot { slot, occupant } => write!(
                f,
                "Slot ({}, {}) is occupied by piece {occupant}",
                slot.0, slot.1
            ),
            Self::EmptySource => write!(f, "No items available"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MalformedRecord {
                collection,
                position,
                field,
            } => write!(
                f,
                "Rejected {collection} record #{position}: missing or invalid '{field}'"
            ),
            Self::Catalog { origin, source } => {
                write!(f, "Failed to parse catalogue '{origin}': {source}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::Output { source } => write!(f, "Failed to write output: {source}"),
        }
    }
}

impl std::error::Error for PlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } | Self::Output { source } => Some(source),
            Self::Catalog { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for results in this crate
pub type Result<T> = std::result::Result<T, PlayError>;

// File system calls map their own errors with a path; a bare `?` on an I/O
// error only comes from writing command output
impl From<std::io::Error> for PlayError {
    fn from(err: std::io::Error) -> Self {
        Self::Output { source: err }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PlayError {
    PlayError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a not-found error
pub fn not_found(kind: &'static str, key: &impl ToString) -> PlayError {
    PlayError::NotFound {
        kind,
        key: key.to_string(),
    }
}

impl PlayError {
    /// Whether this error is a lookup miss
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
