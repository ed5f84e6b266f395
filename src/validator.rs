//! Raw form value validation against schema contracts.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::contract::{FieldKind, FieldSpec, SchemaContract};
use crate::error::{FieldError, ValidateError};
use crate::normalize::{clean, parse_date};
use crate::path::join;
use crate::types::{is_blank, SchemaType, TYPE_KEY};

pub(crate) const INVALID_DATE: &str = "Must be a valid date";
const INVALID_URL: &str = "Must be a valid URL";
const INVALID_EMAIL: &str = "Must be a valid email address";
const INVALID_NUMBER: &str = "Must be a number";
const INVALID_POSITIVE_INTEGER: &str = "Must be a positive whole number";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// Validate raw form values for a schema type.
///
/// Every failing field is collected; validation never stops at the first
/// error. Keys the contract does not declare are ignored.
///
/// # Errors
///
/// Returns `ValidateError::Invalid` with one `FieldError` per failing field.
pub fn validate(schema_type: SchemaType, raw: &Map<String, Value>) -> Result<(), ValidateError> {
    let errors = field_errors(schema_type.contract(), raw);
    debug!(schema_type = %schema_type, errors = errors.len(), "validated form values");

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::Invalid { errors })
    }
}

/// Validate raw form values for a type identifier.
///
/// # Errors
///
/// Returns `ValidateError::Lookup` for an unknown identifier, otherwise as
/// [`validate`].
pub fn validate_type(type_id: &str, raw: &Map<String, Value>) -> Result<(), ValidateError> {
    let schema_type: SchemaType = type_id.parse()?;
    validate(schema_type, raw)
}

/// Collect field errors for `raw` against `contract`, in contract order.
pub fn field_errors(contract: &SchemaContract, raw: &Map<String, Value>) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_fields(contract.fields, raw, "", &mut errors);
    errors
}

fn check_fields(
    fields: &[FieldSpec],
    values: &Map<String, Value>,
    prefix: &str,
    errors: &mut Vec<FieldError>,
) {
    for spec in fields {
        let path = join(prefix, spec.name);
        match values.get(spec.name) {
            Some(value) if !is_blank(value) => {
                check_value(&spec.kind, value, &path, spec.message, errors)
            }
            _ if spec.required => errors.push(FieldError::new(path, spec.message)),
            _ => {}
        }
    }
}

/// Check a non-blank value. `message` is reported when a required list has
/// too few items.
fn check_value(
    kind: &FieldKind,
    value: &Value,
    path: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) {
    match kind {
        FieldKind::Text => {
            if value.is_object() || value.is_array() {
                errors.push(FieldError::new(path, "Expected text"));
            }
        }
        FieldKind::Url => {
            if !scalar_text(value).is_some_and(|s| Url::parse(s.trim()).is_ok()) {
                errors.push(FieldError::new(path, INVALID_URL));
            }
        }
        FieldKind::Email => {
            if !scalar_text(value).is_some_and(|s| EMAIL_REGEX.is_match(s.trim())) {
                errors.push(FieldError::new(path, INVALID_EMAIL));
            }
        }
        FieldKind::Date => {
            if !scalar_text(value).is_some_and(|s| parse_date(s).is_some()) {
                errors.push(FieldError::new(path, INVALID_DATE));
            }
        }
        FieldKind::Number => {
            if !is_number(value) {
                errors.push(FieldError::new(path, INVALID_NUMBER));
            }
        }
        FieldKind::PositiveInteger => {
            if !is_positive_integer(value) {
                errors.push(FieldError::new(path, INVALID_POSITIVE_INTEGER));
            }
        }
        FieldKind::Enumerated(allowed) => {
            if !scalar_text(value).is_some_and(|s| allowed.iter().any(|a| *a == s)) {
                errors.push(FieldError::new(
                    path,
                    format!("Must be one of: {}", allowed.join(", ")),
                ));
            }
        }
        FieldKind::Object(shape) => {
            let Value::Object(map) = value else {
                errors.push(FieldError::new(path, "Expected an object"));
                return;
            };
            if let (Some(tag), Some(actual)) = (shape.type_tag, map.get(TYPE_KEY)) {
                if !is_blank(actual) && actual.as_str() != Some(tag) {
                    errors.push(FieldError::new(
                        join(path, TYPE_KEY),
                        format!("Expected \"{}\"", tag),
                    ));
                }
            }
            check_fields(shape.fields, map, path, errors);
        }
        FieldKind::Array { item, min_items } => {
            let Value::Array(items) = value else {
                errors.push(FieldError::new(path, "Expected a list"));
                return;
            };
            let mut present = 0;
            for (index, element) in items.iter().enumerate() {
                if clean(element).is_none() {
                    continue;
                }
                present += 1;
                check_value(item, element, &join(path, &index.to_string()), message, errors);
            }
            if present < *min_items {
                errors.push(FieldError::new(path, message));
            }
        }
        FieldKind::Union(kinds) => check_union(kinds, value, path, message, errors),
    }
}

/// Pick the alternative matching the value's JSON shape (and `@type`, for
/// objects); report that alternative's errors when none passes.
fn check_union(
    kinds: &[FieldKind],
    value: &Value,
    path: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) {
    let mut candidates: Vec<&FieldKind> = kinds.iter().filter(|k| accepts_shape(k, value)).collect();

    if let Some(tag) = value.get(TYPE_KEY).and_then(Value::as_str) {
        if let Some(tagged) = candidates
            .iter()
            .copied()
            .find(|k| matches!(k, FieldKind::Object(shape) if shape.type_tag == Some(tag)))
        {
            candidates = vec![tagged];
        }
    }

    let mut first_failure = None;
    for kind in candidates {
        let mut scratch = Vec::new();
        check_value(kind, value, path, message, &mut scratch);
        if scratch.is_empty() {
            return;
        }
        first_failure.get_or_insert(scratch);
    }

    match first_failure {
        Some(failure) => errors.extend(failure),
        None => errors.push(FieldError::new(path, "Does not match any accepted form")),
    }
}

fn accepts_shape(kind: &FieldKind, value: &Value) -> bool {
    match kind {
        FieldKind::Object(_) => value.is_object(),
        FieldKind::Array { .. } => value.is_array(),
        FieldKind::Union(kinds) => kinds.iter().any(|k| accepts_shape(k, value)),
        _ => !value.is_object() && !value.is_array(),
    }
}

fn scalar_text(value: &Value) -> Option<&str> {
    value.as_str()
}

fn is_number(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
        _ => false,
    }
}

fn is_positive_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_u64().is_some_and(|n| n > 0),
        Value::String(s) => s.trim().parse::<u64>().is_ok_and(|n| n > 0),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test input must be an object"),
        }
    }

    fn errors_for(schema_type: SchemaType, value: Value) -> Vec<FieldError> {
        field_errors(schema_type.contract(), &raw(value))
    }

    #[test]
    fn validate_valid_values() {
        let result = validate(SchemaType::Organization, &raw(json!({ "name": "Acme" })));
        assert!(result.is_ok());
    }

    #[test]
    fn validate_missing_required_field() {
        let result = validate(SchemaType::Organization, &Map::new());
        match result {
            Err(ValidateError::Invalid { errors }) => {
                assert_eq!(errors, vec![FieldError::new("name", "Name is required")]);
            }
            _ => panic!("expected a single validation error"),
        }
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let errors = errors_for(SchemaType::Organization, json!({ "name": "" }));
        assert_eq!(errors, vec![FieldError::new("name", "Name is required")]);
    }

    #[test]
    fn validate_type_unknown_identifier() {
        let result = validate_type("Recipe", &Map::new());
        assert!(matches!(result, Err(ValidateError::Lookup(_))));
    }

    #[test]
    fn empty_optional_url_is_valid() {
        let errors = errors_for(SchemaType::Organization, json!({ "name": "Acme", "url": "" }));
        assert!(errors.is_empty());
    }

    #[test]
    fn malformed_url_is_rejected() {
        let errors = errors_for(
            SchemaType::Organization,
            json!({ "name": "Acme", "url": "acme dot com" }),
        );
        assert_eq!(errors, vec![FieldError::new("url", "Must be a valid URL")]);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let errors = errors_for(
            SchemaType::Person,
            json!({ "name": "Ada", "email": "ada@" }),
        );
        assert_eq!(errors, vec![FieldError::new("email", "Must be a valid email address")]);

        let errors = errors_for(
            SchemaType::Person,
            json!({ "name": "Ada", "email": "ada.lovelace@example.co.uk" }),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn nested_email_uses_dot_path() {
        let errors = errors_for(
            SchemaType::Organization,
            json!({ "name": "Acme", "contactPoint": { "email": "nope" } }),
        );
        assert_eq!(errors[0].path, "contactPoint.email");
    }

    #[test]
    fn unparseable_date_is_a_field_error() {
        let errors = errors_for(
            SchemaType::Article,
            json!({ "headline": "Hi", "datePublished": "yesterday" }),
        );
        assert_eq!(errors, vec![FieldError::new("datePublished", "Must be a valid date")]);
    }

    #[test]
    fn article_requires_headline_and_date() {
        let errors = errors_for(SchemaType::Article, json!({}));
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["headline", "datePublished"]);
    }

    #[test]
    fn required_nested_object_reports_inner_field() {
        let errors = errors_for(
            SchemaType::JobPosting,
            json!({
                "title": "Engineer",
                "description": "Build things",
                "datePosted": "2024-03-01",
                "employmentType": "FULL_TIME",
                "hiringOrganization": { "name": "" }
            }),
        );
        assert_eq!(
            errors,
            vec![FieldError::new("hiringOrganization.name", "Organization name is required")]
        );
    }

    #[test]
    fn missing_required_object_reports_parent() {
        let errors = errors_for(
            SchemaType::Product,
            json!({ "name": "Widget", "description": "A widget" }),
        );
        assert_eq!(errors, vec![FieldError::new("offers", "Offer details are required")]);
    }

    #[test]
    fn product_offers_with_only_empty_fields_is_valid() {
        let errors = errors_for(
            SchemaType::Product,
            json!({
                "name": "Widget",
                "description": "A widget",
                "offers": { "price": "", "availability": "", "url": "" }
            }),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn number_and_enumeration_checks() {
        let errors = errors_for(
            SchemaType::Product,
            json!({
                "name": "Widget",
                "description": "A widget",
                "offers": { "price": "cheap", "availability": "Maybe" }
            }),
        );
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], FieldError::new("offers.price", "Must be a number"));
        assert_eq!(errors[1].path, "offers.availability");
        assert!(errors[1].message.starts_with("Must be one of: https://schema.org/InStock"));
    }

    #[test]
    fn wrong_nested_type_tag() {
        let errors = errors_for(
            SchemaType::Product,
            json!({
                "name": "Widget",
                "description": "A widget",
                "offers": { "@type": "Demand", "price": "1" }
            }),
        );
        assert_eq!(errors, vec![FieldError::new("offers.@type", "Expected \"Offer\"")]);
    }

    #[test]
    fn faq_requires_one_question() {
        let errors = errors_for(SchemaType::FaqPage, json!({ "mainEntity": [] }));
        assert_eq!(
            errors,
            vec![FieldError::new("mainEntity", "At least one question is required")]
        );

        let errors = errors_for(SchemaType::FaqPage, json!({ "mainEntity": [{ "name": "" }] }));
        assert_eq!(
            errors,
            vec![FieldError::new("mainEntity", "At least one question is required")]
        );
    }

    #[test]
    fn faq_question_fields_are_indexed() {
        let errors = errors_for(
            SchemaType::FaqPage,
            json!({
                "mainEntity": [
                    { "name": "What?", "acceptedAnswer": { "text": "This." } },
                    { "name": "Why?", "acceptedAnswer": { "text": "" } }
                ]
            }),
        );
        assert_eq!(
            errors,
            vec![FieldError::new("mainEntity.1.acceptedAnswer.text", "Answer is required")]
        );
    }

    #[test]
    fn breadcrumb_position_must_be_positive() {
        let errors = errors_for(
            SchemaType::BreadcrumbList,
            json!({
                "itemListElement": [
                    { "position": 1, "name": "Home", "item": "https://example.com" },
                    { "position": "0", "name": "Shoes" }
                ]
            }),
        );
        assert_eq!(
            errors,
            vec![FieldError::new(
                "itemListElement.1.position",
                "Must be a positive whole number"
            )]
        );
    }

    #[test]
    fn image_accepts_url_or_list_of_urls() {
        let ok = errors_for(
            SchemaType::Article,
            json!({
                "headline": "Hi",
                "datePublished": "2024-01-15",
                "image": ["https://example.com/a.png", "https://example.com/b.png"]
            }),
        );
        assert!(ok.is_empty());

        let bad = errors_for(
            SchemaType::Article,
            json!({ "headline": "Hi", "datePublished": "2024-01-15", "image": "a.png" }),
        );
        assert_eq!(bad, vec![FieldError::new("image", "Must be a valid URL")]);

        let bad_item = errors_for(
            SchemaType::Article,
            json!({ "headline": "Hi", "datePublished": "2024-01-15", "image": ["a.png"] }),
        );
        assert_eq!(bad_item, vec![FieldError::new("image.0", "Must be a valid URL")]);
    }

    #[test]
    fn union_object_chosen_by_type_tag() {
        let errors = errors_for(
            SchemaType::Event,
            json!({
                "name": "Launch",
                "startDate": "2024-05-01",
                "organizer": { "@type": "Organization", "name": "Acme" },
                "location": { "@type": "Place", "name": "Hall", "address": { "postalCode": "123" } }
            }),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn union_rejects_wrong_shape() {
        let errors = errors_for(
            SchemaType::VideoObject,
            json!({
                "name": "Clip",
                "description": "A clip",
                "thumbnailUrl": "https://example.com/t.jpg",
                "uploadDate": "2024-01-01",
                "author": ["Ada"]
            }),
        );
        assert_eq!(
            errors,
            vec![FieldError::new("author", "Does not match any accepted form")]
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let errors = errors_for(
            SchemaType::Organization,
            json!({ "name": "Acme", "slogan": "We make things" }),
        );
        assert!(errors.is_empty());
    }
}
