//! Error types for acadmesh library

use std::io;
use thiserror::Error;

/// Main error type for acadmesh operations
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred while reading or writing tags
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error tokenizing DXF tag text
    #[error("Parse error: {0}")]
    Parse(String),

    /// A tag in a packed run holds a value of the wrong shape
    #[error("Type mismatch at group code {code}: expected {expected}, found {found}")]
    TypeMismatch {
        code: i32,
        expected: &'static str,
        found: &'static str,
    },

    /// Negative counter, or a vertex index outside the unsigned 32-bit range
    #[error("Invalid value at group code {code}: {value}")]
    InvalidValue { code: i32, value: i64 },

    /// Counter tag disagrees with the run that follows it (strict decoding only)
    #[error("Malformed run for counter {code}: declared {declared}, found {actual}")]
    MalformedLength {
        code: i32,
        declared: usize,
        actual: usize,
    },

    /// Crease values do not line up with edges (strict decoding only)
    #[error("Edge crease count mismatch: {edges} edges, {creases} crease values")]
    CreaseCountMismatch { edges: usize, creases: usize },

    /// Invalid entity type
    #[error("Invalid entity type: {0}")]
    InvalidEntityType(String),

    /// Required subclass marker is missing
    #[error("Missing subclass: {0}")]
    MissingSubclass(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for acadmesh operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl From<String> for DxfError {
    fn from(s: String) -> Self {
        DxfError::Custom(s)
    }
}

impl From<&str> for DxfError {
    fn from(s: &str) -> Self {
        DxfError::Custom(s.to_string())
    }
}
