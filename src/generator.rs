//! Document generation - validation and normalization side by side.
//!
//! The two halves run independently: a form with errors still produces a
//! preview document, and the caller decides what to do with the errors.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{FieldError, LookupError};
use crate::normalize::normalize;
use crate::types::{GenerateOptions, SchemaType};
use crate::validator::field_errors;

/// Linkage keys every document carries.
const LINKAGE_KEYS: usize = 2;

/// Output of one generation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generated {
    /// The cleaned document, or `None` if it failed the content gate.
    pub document: Option<Value>,
    /// Field errors from validation and date coercion, in contract order.
    pub errors: Vec<FieldError>,
}

impl Generated {
    /// True when no field errors were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate and normalize raw values for `schema_type`.
///
/// Date coercion failures are merged into `errors` unless validation already
/// reported the same path.
pub fn generate(
    schema_type: SchemaType,
    raw: &Map<String, Value>,
    options: &GenerateOptions,
) -> Generated {
    let mut errors = field_errors(schema_type.contract(), raw);
    let normalized = normalize(schema_type, raw);

    for date_error in normalized.date_errors {
        let error = FieldError::from(date_error);
        if !errors.iter().any(|e| e.path == error.path) {
            errors.push(error);
        }
    }

    let document = passes_gate(&normalized.document, options)
        .then(|| Value::Object(normalized.document));

    debug!(
        schema_type = %schema_type,
        errors = errors.len(),
        emitted = document.is_some(),
        "generated document"
    );

    Generated { document, errors }
}

/// Validate and normalize raw values for a type identifier.
///
/// # Errors
///
/// Returns `LookupError` if `type_id` is unknown; no document is produced.
pub fn generate_for(
    type_id: &str,
    raw: &Map<String, Value>,
    options: &GenerateOptions,
) -> Result<Generated, LookupError> {
    let schema_type: SchemaType = type_id.parse()?;
    Ok(generate(schema_type, raw, options))
}

fn passes_gate(document: &Map<String, Value>, options: &GenerateOptions) -> bool {
    if options.require_content {
        document.len() > LINKAGE_KEYS
    } else {
        document.len() >= LINKAGE_KEYS
    }
}

/// Wrap a document in a `<script type="application/ld+json">` element.
///
/// `</` is written as `<\/` so string values cannot close the element early;
/// both spellings decode to the same JSON.
pub fn to_script_tag(document: &Value) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(document)?.replace("</", "<\\/");
    Ok(format!(
        "<script type=\"application/ld+json\">\n{}\n</script>",
        json
    ))
}
