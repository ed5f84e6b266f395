//! Loading raw form values and documents.
//!
//! Handles JSON from files, strings, and readers (stdin). Raw values must be
//! a top-level object.

use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::LoadError;
use crate::types::json_type_name;

/// Load any JSON value from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// or `LoadError::InvalidJson` if the file isn't valid JSON.
pub fn load_json(path: &Path) -> Result<Value, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| LoadError::InvalidJson { source })
}

/// Load raw values from a file path.
///
/// # Errors
///
/// As [`load_json`], plus `LoadError::NotAnObject` if the top level isn't
/// an object.
pub fn load_values(path: &Path) -> Result<Map<String, Value>, LoadError> {
    into_object(load_json(path)?)
}

/// Load raw values from a JSON string.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the string isn't valid JSON, or
/// `LoadError::NotAnObject` if the top level isn't an object.
pub fn load_values_str(content: &str) -> Result<Map<String, Value>, LoadError> {
    let value = serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })?;
    into_object(value)
}

/// Load raw values from a reader, typically stdin.
///
/// # Errors
///
/// Returns `LoadError::StdinError` if reading fails, otherwise as
/// [`load_values_str`].
pub fn load_values_reader(mut reader: impl Read) -> Result<Map<String, Value>, LoadError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| LoadError::StdinError { source })?;
    load_values_str(&content)
}

fn into_object(value: Value) -> Result<Map<String, Value>, LoadError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(LoadError::NotAnObject {
            actual: json_type_name(&other).to_string(),
        }),
    }
}
