//! Core types for schema.org markup generation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LookupError;

/// Value of the `@context` linkage key.
pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Linkage key holding the JSON-LD context.
pub const CONTEXT_KEY: &str = "@context";

/// Linkage key holding the active type identifier.
pub const TYPE_KEY: &str = "@type";

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A value counts as absent when it is null or an empty string.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Supported schema.org types.
///
/// Each variant owns exactly one contract, see [`SchemaType::contract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaType {
    Organization,
    Article,
    Product,
    LocalBusiness,
    Event,
    #[serde(rename = "FAQPage")]
    FaqPage,
    BreadcrumbList,
    JobPosting,
    Person,
    VideoObject,
}

impl SchemaType {
    /// Every supported type, in selector order.
    pub const ALL: [SchemaType; 10] = [
        SchemaType::Organization,
        SchemaType::Article,
        SchemaType::Product,
        SchemaType::LocalBusiness,
        SchemaType::Event,
        SchemaType::FaqPage,
        SchemaType::BreadcrumbList,
        SchemaType::JobPosting,
        SchemaType::Person,
        SchemaType::VideoObject,
    ];

    /// The schema.org identifier written to `@type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Organization => "Organization",
            SchemaType::Article => "Article",
            SchemaType::Product => "Product",
            SchemaType::LocalBusiness => "LocalBusiness",
            SchemaType::Event => "Event",
            SchemaType::FaqPage => "FAQPage",
            SchemaType::BreadcrumbList => "BreadcrumbList",
            SchemaType::JobPosting => "JobPosting",
            SchemaType::Person => "Person",
            SchemaType::VideoObject => "VideoObject",
        }
    }

    /// Human-readable name for pickers.
    pub fn label(&self) -> &'static str {
        match self {
            SchemaType::Organization => "Organization",
            SchemaType::Article => "Article",
            SchemaType::Product => "Product",
            SchemaType::LocalBusiness => "Local Business",
            SchemaType::Event => "Event",
            SchemaType::FaqPage => "FAQ Page",
            SchemaType::BreadcrumbList => "Breadcrumb List",
            SchemaType::JobPosting => "Job Posting",
            SchemaType::Person => "Person",
            SchemaType::VideoObject => "Video Object",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SchemaType::Organization => "Business, corporation, or organization",
            SchemaType::Article => "Blog posts, news articles, editorial content",
            SchemaType::Product => "E-commerce product listings",
            SchemaType::LocalBusiness => "Local business listings (restaurants, shops, services)",
            SchemaType::Event => "Events, conferences, concerts",
            SchemaType::FaqPage => "Frequently asked questions",
            SchemaType::BreadcrumbList => "Site navigation breadcrumbs",
            SchemaType::JobPosting => "Job listings and career pages",
            SchemaType::Person => "Personal profiles, authors, team members",
            SchemaType::VideoObject => "Video content metadata",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = LookupError;

    /// Identifiers match exactly; `article` is not `Article`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| LookupError::UnknownType {
                type_id: s.to_string(),
            })
    }
}

/// Options for document generation.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// When true, a document holding only the two linkage keys is
    /// suppressed. Defaults to false so an empty form still previews.
    pub require_content: bool,
}

impl GenerateOptions {
    /// Create options with the minimal two-key gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require at least one field beyond `@context` and `@type`.
    pub fn require_content(mut self, require_content: bool) -> Self {
        self.require_content = require_content;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identifiers_round_trip_through_from_str() {
        for t in SchemaType::ALL {
            assert_eq!(t.as_str().parse::<SchemaType>().unwrap(), t);
        }
    }

    #[test]
    fn from_str_is_case_sensitive() {
        let err = "article".parse::<SchemaType>().unwrap_err();
        assert!(matches!(err, LookupError::UnknownType { ref type_id } if type_id == "article"));
        assert!("Faqpage".parse::<SchemaType>().is_err());
    }

    #[test]
    fn faq_page_serializes_with_schema_org_casing() {
        assert_eq!(serde_json::to_value(SchemaType::FaqPage).unwrap(), json!("FAQPage"));
        assert_eq!(SchemaType::FaqPage.to_string(), "FAQPage");
    }

    #[test]
    fn labels_differ_from_identifiers_where_spaced() {
        assert_eq!(SchemaType::LocalBusiness.label(), "Local Business");
        assert_eq!(SchemaType::VideoObject.label(), "Video Object");
    }

    #[test]
    fn blank_values() {
        assert!(is_blank(&json!(null)));
        assert!(is_blank(&json!("")));
        assert!(!is_blank(&json!(" ")));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!({})));
    }

    #[test]
    fn generate_options_default_to_vacuous_gate() {
        assert!(!GenerateOptions::new().require_content);
        assert!(GenerateOptions::new().require_content(true).require_content);
    }
}
