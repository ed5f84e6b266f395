//! JSON Schema export and checking of emitted documents.
//!
//! A contract describes raw form values; [`SchemaContract::to_json_schema`]
//! describes the document those values normalize into. [`check_document`]
//! validates an existing JSON-LD document structurally with `jsonschema`,
//! then against the contract's value rules.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::contract::{FieldKind, FieldSpec, ObjectShape, SchemaContract};
use crate::error::{FieldError, ValidateError};
use crate::types::{json_type_name, SchemaType, CONTEXT_KEY, SCHEMA_CONTEXT, TYPE_KEY};
use crate::validator::field_errors;

const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// Path reported for errors on the document itself.
const ROOT_PATH: &str = "(document)";

impl SchemaContract {
    /// JSON Schema (draft 2020-12) for documents of this type.
    pub fn to_json_schema(&self) -> Value {
        let schema_type = self.schema_type;
        let (mut properties, mut required) = fields_schema(self.fields);

        let mut linkage = Map::new();
        linkage.insert(CONTEXT_KEY.to_string(), json!({ "const": SCHEMA_CONTEXT }));
        linkage.insert(TYPE_KEY.to_string(), json!({ "const": schema_type.as_str() }));
        linkage.append(&mut properties);
        required.insert(0, TYPE_KEY.to_string());
        required.insert(0, CONTEXT_KEY.to_string());

        json!({
            "$schema": DRAFT_2020_12,
            "title": schema_type.label(),
            "description": schema_type.description(),
            "type": "object",
            "properties": linkage,
            "required": required,
        })
    }
}

fn fields_schema(fields: &[FieldSpec]) -> (Map<String, Value>, Vec<String>) {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for spec in fields {
        let mut schema = kind_schema(&spec.kind);
        if let Value::Object(map) = &mut schema {
            map.insert("title".to_string(), Value::String(spec.label.to_string()));
        }
        properties.insert(spec.name.to_string(), schema);
        if spec.required {
            required.push(spec.name.to_string());
        }
    }
    (properties, required)
}

fn kind_schema(kind: &FieldKind) -> Value {
    match kind {
        FieldKind::Text => json!({ "type": ["string", "number", "boolean"] }),
        FieldKind::Url => json!({ "type": "string", "format": "uri" }),
        FieldKind::Email => json!({ "type": "string", "format": "email" }),
        FieldKind::Date => json!({ "type": "string" }),
        FieldKind::Number => json!({ "type": ["number", "string"] }),
        FieldKind::PositiveInteger => json!({
            "anyOf": [
                { "type": "integer", "minimum": 1 },
                { "type": "string", "pattern": "^\\s*0*[1-9][0-9]*\\s*$" }
            ]
        }),
        FieldKind::Enumerated(values) => json!({ "enum": values }),
        FieldKind::Object(shape) => object_schema(shape),
        FieldKind::Array { item, min_items } => {
            let mut schema = json!({ "type": "array", "items": kind_schema(item) });
            if *min_items > 0 {
                schema["minItems"] = json!(min_items);
            }
            schema
        }
        FieldKind::Union(kinds) => json!({
            "anyOf": kinds.iter().map(kind_schema).collect::<Vec<_>>()
        }),
    }
}

fn object_schema(shape: &ObjectShape) -> Value {
    let (mut properties, required) = fields_schema(shape.fields);
    if let Some(tag) = shape.type_tag {
        let mut tagged = Map::new();
        tagged.insert(TYPE_KEY.to_string(), json!({ "const": tag }));
        tagged.append(&mut properties);
        properties = tagged;
    }

    let mut schema = json!({ "type": "object", "properties": properties });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

/// Check an emitted JSON-LD document.
///
/// The type is read from `@type`. Structural errors (wrong JSON types,
/// missing required keys, wrong `@context`) are reported first; value rules
/// (URL, email, date, number) only run on a structurally sound document.
///
/// # Errors
///
/// Returns `ValidateError::InvalidDocument` if the document is not an object
/// or lacks a string `@type`, `ValidateError::Lookup` for an unsupported
/// type, and `ValidateError::Invalid` for field errors.
pub fn check_document(document: &Value) -> Result<SchemaType, ValidateError> {
    let Value::Object(map) = document else {
        return Err(ValidateError::InvalidDocument {
            message: format!("expected a JSON object, got {}", json_type_name(document)),
        });
    };

    let type_id = map
        .get(TYPE_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| ValidateError::InvalidDocument {
            message: format!("missing string \"{}\"", TYPE_KEY),
        })?;
    let schema_type: SchemaType = type_id.parse()?;
    let contract = schema_type.contract();

    let schema = contract.to_json_schema();
    let validator = jsonschema::validator_for(&schema).map_err(|e| ValidateError::InvalidSchema {
        message: e.to_string(),
    })?;

    let mut errors: Vec<FieldError> = validator
        .iter_errors(document)
        .map(|e| FieldError::new(pointer_to_dot_path(&e.instance_path.to_string()), e.to_string()))
        .collect();

    if errors.is_empty() {
        errors = field_errors(contract, map);
    }

    debug!(schema_type = %schema_type, errors = errors.len(), "checked document");

    if errors.is_empty() {
        Ok(schema_type)
    } else {
        Err(ValidateError::Invalid { errors })
    }
}

/// `/offers/url` → `offers.url`; the root pointer maps to `(document)`.
fn pointer_to_dot_path(pointer: &str) -> String {
    let trimmed = pointer.trim_start_matches('/');
    if trimmed.is_empty() {
        return ROOT_PATH.to_string();
    }
    trimmed
        .split('/')
        .map(|part| part.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}
