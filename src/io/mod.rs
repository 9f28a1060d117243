//! Input/output, configuration and error handling
//!
//! This module contains the ambient plumbing around the engines:
//! - Error types and configuration defaults
//! - Structured logging
//! - Image probing, piece cutting and board export
//! - Progress display and the command-line front end

/// Command-line interface
pub mod cli;
/// Constants and default policies
pub mod configuration;
/// Error types
pub mod error;
/// Image probing and export
pub mod image;
/// Structured JSON-lines logging
pub mod logging;
/// Batch progress display
pub mod progress;
