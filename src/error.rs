//! Error types for schema markup generation and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Unknown schema type identifier.
///
/// Callers restricted to [`SchemaType::ALL`](crate::SchemaType::ALL) never
/// see this; it marks a caller bug, not bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unknown schema type \"{type_id}\"")]
    UnknownType { type_id: String },
}

impl LookupError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Errors while loading raw values or documents.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read stdin: {source}")]
    StdinError {
        #[source]
        source: std::io::Error,
    },

    // Content errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a JSON object at the top level, got {actual}")]
    NotAnObject { actual: String },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. }
            | LoadError::ReadError { .. }
            | LoadError::StdinError { .. } => 3,
            _ => 2,
        }
    }
}

/// Errors during validation.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("invalid document: {message}")]
    InvalidDocument { message: String },

    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },

    #[error("validation failed with {} error(s)", errors.len())]
    Invalid { errors: Vec<FieldError> },
}

impl ValidateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ValidateError::Lookup(e) => e.exit_code(),
            ValidateError::InvalidDocument { .. } | ValidateError::InvalidSchema { .. } => 2,
            ValidateError::Invalid { .. } => 1,
        }
    }

    /// Field errors carried by this error, empty for non-field failures.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ValidateError::Invalid { errors } => errors,
            _ => &[],
        }
    }
}

/// Single validation error with field path context.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    /// Dot path to the invalid field (e.g. `offers.url`).
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A date field held a value that is not a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: \"{value}\" is not a valid date")]
pub struct DateParseError {
    pub field: String,
    pub value: String,
}

impl From<DateParseError> for FieldError {
    fn from(err: DateParseError) -> Self {
        FieldError::new(err.field, crate::validator::INVALID_DATE)
    }
}

/// Malformed dot path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("field path is empty")]
    Empty,

    #[error("field path \"{path}\" has an empty segment")]
    EmptySegment { path: String },

    #[error("field path \"{path}\" has list index {index}, maximum is {max}")]
    IndexOutOfRange {
        path: String,
        index: String,
        max: usize,
    },
}
