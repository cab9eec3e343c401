//! Error types for trueno-histogram operations.

use std::io;
use thiserror::Error;

use crate::histogram::{XMode, YMode};

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building, mutating or combining histograms.
#[derive(Error, Debug)]
pub enum Error {
    /// An array length is incompatible with the bin count or X shape.
    #[error("Size mismatch for {array}: expected {expected} elements, got {actual}")]
    SizeMismatch {
        /// Role of the offending array (e.g. "BinEdges").
        array: &'static str,
        /// Length required by the histogram.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Y data of one flavour was supplied to a histogram latched to the other.
    #[error("Invalid Y mode transition: histogram holds {current}, cannot accept {requested}")]
    InvalidModeTransition {
        /// Y mode currently latched.
        current: YMode,
        /// Y mode the operation required.
        requested: YMode,
    },

    /// A conversion has no meaningful result for the given input.
    #[error("Degenerate construction: {0}")]
    DegenerateConstruction(&'static str),

    /// X data tagged with one shape was given where the other is stored.
    #[error("X mode mismatch: histogram stores {expected}, got {actual}")]
    XModeMismatch {
        /// X mode the histogram stores.
        expected: XMode,
        /// X mode of the supplied data.
        actual: XMode,
    },

    /// Operation is not defined for the operands' modes.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Two histograms do not share compatible X data.
    #[error("X data mismatch: {0}")]
    XDataMismatch(String),

    /// Index or value range outside the histogram.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Bin edges are not strictly increasing.
    #[error("Invalid bin edges: {0}")]
    InvalidBinEdges(String),

    /// Required array has not been set.
    #[error("Missing data: {0} not set")]
    MissingData(&'static str),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found or unreadable.
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was looked up.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },
}
