//! Normalization - turns raw form values into a clean JSON-LD document.
//!
//! Three passes, in order:
//! 1. top-level date fields are coerced to UTC timestamps
//! 2. `@context` and `@type` are injected
//! 3. every other value is cleaned recursively (empty strings, nulls, and
//!    containers left empty are dropped)
//!
//! The transform never looks at the contract, so a preview is available
//! even when validation fails.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::error::DateParseError;
use crate::types::{is_blank, SchemaType, CONTEXT_KEY, SCHEMA_CONTEXT, TYPE_KEY};

/// Top-level fields holding calendar dates.
pub const DATE_FIELDS: &[&str] = &[
    "datePublished",
    "dateModified",
    "startDate",
    "endDate",
    "uploadDate",
    "datePosted",
];

/// Output format for coerced dates (millisecond precision, `Z` suffix).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Result of normalizing one set of raw values.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Linkage keys first, then cleaned fields in input order.
    pub document: Map<String, Value>,
    /// Date fields left uncoerced because they did not parse.
    pub date_errors: Vec<DateParseError>,
}

/// Normalize raw values for `schema_type`.
///
/// Raw `@context` and `@type` keys are ignored; the injected values win.
/// A date field that fails to parse keeps its raw string and is reported in
/// [`Normalized::date_errors`].
pub fn normalize(schema_type: SchemaType, raw: &Map<String, Value>) -> Normalized {
    let mut document = Map::new();
    document.insert(CONTEXT_KEY.to_string(), Value::String(SCHEMA_CONTEXT.to_string()));
    document.insert(TYPE_KEY.to_string(), Value::String(schema_type.as_str().to_string()));

    let mut date_errors = Vec::new();

    for (key, value) in raw {
        if key == CONTEXT_KEY || key == TYPE_KEY {
            trace!(key = %key, "ignoring raw linkage key");
            continue;
        }

        let coerced = match value {
            Value::String(s) if !s.is_empty() && DATE_FIELDS.contains(&key.as_str()) => {
                match coerce_date(key, s) {
                    Ok(timestamp) => Value::String(timestamp),
                    Err(err) => {
                        warn!(field = %key, value = %s, "date did not parse, keeping raw value");
                        date_errors.push(err);
                        value.clone()
                    }
                }
            }
            _ => value.clone(),
        };

        match clean(&coerced) {
            Some(cleaned) => {
                document.insert(key.clone(), cleaned);
            }
            None => trace!(key = %key, "dropping empty value"),
        }
    }

    debug!(
        schema_type = %schema_type,
        fields = document.len() - 2,
        date_errors = date_errors.len(),
        "normalized form values"
    );

    Normalized {
        document,
        date_errors,
    }
}

/// Recursively strip empty values.
///
/// Returns `None` when the value itself is empty: null, `""`, or a mapping
/// or sequence with nothing left after cleaning. Other scalars pass through.
pub fn clean(value: &Value) -> Option<Value> {
    match value {
        Value::Object(map) => {
            let cleaned: Map<String, Value> = map
                .iter()
                .filter_map(|(k, v)| clean(v).map(|v| (k.clone(), v)))
                .collect();
            (!cleaned.is_empty()).then_some(Value::Object(cleaned))
        }
        Value::Array(items) => {
            let cleaned: Vec<Value> = items.iter().filter_map(clean).collect();
            (!cleaned.is_empty()).then_some(Value::Array(cleaned))
        }
        other if is_blank(other) => None,
        other => Some(other.clone()),
    }
}

/// Parse a calendar date or timestamp.
///
/// Accepts RFC 3339 (`2024-01-15T10:00:00+02:00`), plain dates
/// (`2024-01-15`, midnight), and `datetime-local` values
/// (`2024-01-15T10:00`, `2024-01-15T10:00:00`). Values without an offset
/// are read as UTC.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Coerce a date field to a `YYYY-MM-DDTHH:MM:SS.mmmZ` timestamp.
///
/// # Errors
///
/// Returns `DateParseError` if `value` is not a recognizable date.
pub fn coerce_date(field: &str, value: &str) -> Result<String, DateParseError> {
    parse_date(value)
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .ok_or_else(|| DateParseError {
            field: field.to_string(),
            value: value.to_string(),
        })
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

    #[test]
    fn injects_linkage_keys_first() {
        let out = normalize(SchemaType::Person, &raw(json!({ "name": "Ada" })));
        let keys: Vec<&str> = out.document.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["@context", "@type", "name"]);
        assert_eq!(out.document["@context"], json!("https://schema.org"));
        assert_eq!(out.document["@type"], json!("Person"));
    }

    #[test]
    fn empty_input_yields_linkage_only() {
        let out = normalize(SchemaType::Organization, &Map::new());
        assert_eq!(out.document.len(), 2);
        assert!(out.date_errors.is_empty());
    }

    #[test]
    fn raw_linkage_keys_are_ignored() {
        let out = normalize(
            SchemaType::Article,
            &raw(json!({ "@type": "Recipe", "@context": "http://example.com" })),
        );
        assert_eq!(out.document["@type"], json!("Article"));
        assert_eq!(out.document["@context"], json!("https://schema.org"));
    }

    #[test]
    fn coerces_plain_date_to_midnight_utc() {
        let out = normalize(
            SchemaType::Article,
            &raw(json!({ "datePublished": "2024-01-15" })),
        );
        assert_eq!(out.document["datePublished"], json!("2024-01-15T00:00:00.000Z"));
    }

    #[test]
    fn coerces_offset_timestamp_to_utc() {
        assert_eq!(
            coerce_date("startDate", "2024-06-01T18:30:00+02:00").unwrap(),
            "2024-06-01T16:30:00.000Z"
        );
        assert_eq!(
            coerce_date("startDate", "2024-06-01T18:30").unwrap(),
            "2024-06-01T18:30:00.000Z"
        );
    }

    #[test]
    fn coerced_dates_are_stable() {
        let once = coerce_date("uploadDate", "2024-01-15").unwrap();
        let twice = coerce_date("uploadDate", &once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn unparseable_date_is_kept_and_reported() {
        let out = normalize(SchemaType::Event, &raw(json!({ "startDate": "soon" })));
        assert_eq!(out.document["startDate"], json!("soon"));
        assert_eq!(
            out.date_errors,
            vec![DateParseError {
                field: "startDate".into(),
                value: "soon".into()
            }]
        );
    }

    #[test]
    fn invalid_calendar_day_is_rejected() {
        assert!(parse_date("2023-02-30").is_none());
        assert!(parse_date("15/01/2024").is_none());
    }

    #[test]
    fn only_top_level_dates_are_coerced() {
        let out = normalize(
            SchemaType::Article,
            &raw(json!({ "author": { "datePublished": "2024-01-15" } })),
        );
        assert_eq!(out.document["author"]["datePublished"], json!("2024-01-15"));
    }

    #[test]
    fn non_date_fields_are_not_coerced() {
        let out = normalize(
            SchemaType::Organization,
            &raw(json!({ "foundingDate": "2001-02-03" })),
        );
        assert_eq!(out.document["foundingDate"], json!("2001-02-03"));
    }

    #[test]
    fn clean_drops_blank_scalars() {
        assert_eq!(clean(&json!("")), None);
        assert_eq!(clean(&json!(null)), None);
        assert_eq!(clean(&json!(" ")), Some(json!(" ")));
        assert_eq!(clean(&json!(false)), Some(json!(false)));
        assert_eq!(clean(&json!(0)), Some(json!(0)));
    }

    #[test]
    fn clean_collapses_nested_empties() {
        let value = json!({
            "a": { "b": { "c": "" } },
            "d": [null, "", { "e": null }],
            "f": "kept"
        });
        assert_eq!(clean(&value), Some(json!({ "f": "kept" })));
    }

    #[test]
    fn clean_keeps_order_within_mappings() {
        let value = json!({ "z": "1", "a": "", "m": "2" });
        let cleaned = clean(&value).unwrap();
        let keys: Vec<&str> = cleaned.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "m"]);
    }

    #[test]
    fn clean_filters_sequence_elements() {
        let value = json!(["https://a.example", "", null, "https://b.example"]);
        assert_eq!(
            clean(&value),
            Some(json!(["https://a.example", "https://b.example"]))
        );
    }
}
