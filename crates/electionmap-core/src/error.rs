//! Error handling for ElectionMap
//!
//! Provides error types for every layer of the map core:
//! - Decode errors (shapefile binary format)
//! - Geometry errors (multi-part record invariants)
//! - Map lookup and I/O errors (loading maps by identifier)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

fn record_suffix(record: &Option<i32>) -> String {
    match record {
        Some(number) => format!(" (record {number})"),
        None => String::new(),
    }
}

/// Shapefile decode error type
///
/// Every variant is fatal to the decode that produced it; no partially
/// decoded map is ever returned alongside one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The stream ended before a header, record header or record body was complete
    #[error("Truncated record at byte offset {offset}{}: needed {needed} bytes, {available} available", record_suffix(.record))]
    TruncatedRecord {
        /// Byte offset where the incomplete structure starts.
        offset: usize,
        /// Record number, when the record header was readable.
        record: Option<i32>,
        /// Number of bytes the structure requires.
        needed: usize,
        /// Number of bytes left in the stream.
        available: usize,
    },

    /// Declared counts or part offsets disagree with the record content
    #[error("Malformed record at byte offset {offset}{}: {reason}", record_suffix(.record))]
    MalformedRecord {
        /// Byte offset of the record header.
        offset: usize,
        /// Record number, when the record header was readable.
        record: Option<i32>,
        /// What was inconsistent.
        reason: String,
    },

    /// The record carries a shape type tag this decoder does not handle
    #[error("Unsupported shape type {shape_type} at byte offset {offset}{}", record_suffix(.record))]
    UnsupportedShapeType {
        /// Byte offset of the record header.
        offset: usize,
        /// Record number, when the record header was readable.
        record: Option<i32>,
        /// The raw shape type tag.
        shape_type: i32,
    },

    /// A fixed file header field does not hold the value the format requires
    #[error("Header mismatch for {field} at byte offset {offset}: expected {expected}, found {found}")]
    HeaderMismatch {
        /// Header field name.
        field: &'static str,
        /// Byte offset of the field.
        offset: usize,
        /// Expected value (or constraint).
        expected: String,
        /// Value found in the file.
        found: String,
    },
}

impl DecodeError {
    /// Byte offset the error refers to
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::TruncatedRecord { offset, .. }
            | DecodeError::MalformedRecord { offset, .. }
            | DecodeError::UnsupportedShapeType { offset, .. }
            | DecodeError::HeaderMismatch { offset, .. } => *offset,
        }
    }

    /// Record number the error refers to, if it was known
    pub fn record_number(&self) -> Option<i32> {
        match self {
            DecodeError::TruncatedRecord { record, .. }
            | DecodeError::MalformedRecord { record, .. }
            | DecodeError::UnsupportedShapeType { record, .. } => *record,
            DecodeError::HeaderMismatch { .. } => None,
        }
    }
}

/// Multi-part geometry invariant violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A record must have at least one part
    #[error("Record has no parts")]
    NoParts,

    /// The first part must start at point index 0
    #[error("First part starts at {start}, expected 0")]
    FirstPartNotAtZero {
        /// Offset found in `parts[0]`.
        start: usize,
    },

    /// Part offsets must be strictly increasing
    #[error("Part {index} starts at {start}, not after previous part start {previous}")]
    PartsNotIncreasing {
        /// Index of the offending part.
        index: usize,
        /// Its start offset.
        start: usize,
        /// The previous part's start offset.
        previous: usize,
    },

    /// Every part must start inside the point arrays
    #[error("Part {index} starts at {start}, beyond {num_points} points")]
    PartOutOfRange {
        /// Index of the offending part.
        index: usize,
        /// Its start offset.
        start: usize,
        /// Total number of points.
        num_points: usize,
    },

    /// X and Y coordinate arrays must have the same length
    #[error("Coordinate arrays differ in length: {xs} x values, {ys} y values")]
    CoordinateLengthMismatch {
        /// Length of the x array.
        xs: usize,
        /// Length of the y array.
        ys: usize,
    },
}

/// Main error type for ElectionMap
///
/// A unified error type that can represent any error from the map core.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Shapefile decode error
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Geometry invariant error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// No map is known under the requested identifier
    #[error("Map not found: {identifier}")]
    MapNotFound {
        /// The identifier that was requested.
        identifier: String,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a decode error
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Error::Decode(_))
    }

    /// Check if this is a missing-map error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::MapNotFound { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
