//! Schema Markup Generator
//!
//! Validation and normalization of form values into schema.org JSON-LD.
//!
//! A caller picks one of ten [`SchemaType`]s and hands over the raw form
//! values (strings and nested mappings). The values are validated against
//! the type's [`SchemaContract`] and, independently, normalized into a clean
//! document, so a preview is available even while fields are invalid.
//!
//! # Example
//!
//! ```
//! use schema_markup::{generate, GenerateOptions, SchemaType};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "headline": "Hello",
//!     "datePublished": "2024-01-15",
//!     "author": { "name": "" }
//! });
//!
//! let out = generate(SchemaType::Article, raw.as_object().unwrap(), &GenerateOptions::new());
//!
//! assert!(out.is_valid());
//! assert_eq!(
//!     out.document.unwrap(),
//!     json!({
//!         "@context": "https://schema.org",
//!         "@type": "Article",
//!         "headline": "Hello",
//!         "datePublished": "2024-01-15T00:00:00.000Z"
//!     })
//! );
//! ```
//!
//! # Cleaning Rules
//!
//! | Value | Result |
//! |-------|--------|
//! | `""` or `null` | Removed |
//! | Mapping | Cleaned recursively, removed if nothing is left |
//! | Sequence | Elements cleaned, empty ones dropped, removed if nothing is left |
//! | Anything else | Copied as-is |
//!
//! The top-level date fields (`datePublished`, `dateModified`, `startDate`,
//! `endDate`, `uploadDate`, `datePosted`) are rewritten as UTC timestamps
//! before cleaning. A date that does not parse is left as typed and reported
//! as a field error.

mod contract;
mod error;
mod export;
mod generator;
mod loader;
mod normalize;
mod path;
mod types;
mod validator;

pub use contract::{get_contract, FieldKind, FieldSpec, ObjectShape, SchemaContract};
pub use error::{DateParseError, FieldError, LoadError, LookupError, PathError, ValidateError};
pub use export::check_document;
pub use generator::{generate, generate_for, to_script_tag, Generated};
pub use loader::{load_json, load_values, load_values_reader, load_values_str};
pub use normalize::{clean, coerce_date, normalize, parse_date, Normalized, DATE_FIELDS};
pub use path::{expand, FieldPath, MAX_LIST_INDEX};
pub use types::{
    json_type_name, GenerateOptions, SchemaType, CONTEXT_KEY, SCHEMA_CONTEXT, TYPE_KEY,
};
pub use validator::{field_errors, validate, validate_type};
