//! Schema registry - per-type field contracts.
//!
//! Every [`SchemaType`] owns one static [`SchemaContract`]. A contract is an
//! ordered table of [`FieldSpec`]s; nested objects are [`ObjectShape`]s with
//! their own tables rather than flattened paths.
//!
//! | Kind | Accepts |
//! |------|---------|
//! | `Text` | any string |
//! | `Url` | absolute URL |
//! | `Email` | `local@domain.tld` |
//! | `Date` | `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]`, RFC 3339 |
//! | `Number` | numeric string or JSON number |
//! | `PositiveInteger` | whole number > 0 |
//! | `Enumerated` | one of a fixed list |
//! | `Object` | nested mapping checked against a shape |
//! | `Array` | sequence of one kind |
//! | `Union` | any of several kinds |
//!
//! Empty strings are treated as absent for every kind, so an optional URL
//! left blank passes while `"not a url"` fails.

use crate::error::LookupError;
use crate::types::SchemaType;

/// Shape of a single field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Url,
    Email,
    Date,
    Number,
    PositiveInteger,
    Enumerated(&'static [&'static str]),
    Object(&'static ObjectShape),
    Array {
        item: &'static FieldKind,
        min_items: usize,
    },
    Union(&'static [FieldKind]),
}

impl FieldKind {
    /// Short description used in field listings.
    pub fn describe(&self) -> String {
        match self {
            FieldKind::Text => "text".to_string(),
            FieldKind::Url => "url".to_string(),
            FieldKind::Email => "email".to_string(),
            FieldKind::Date => "date".to_string(),
            FieldKind::Number => "number".to_string(),
            FieldKind::PositiveInteger => "positive integer".to_string(),
            FieldKind::Enumerated(values) => format!("one of [{}]", values.join(", ")),
            FieldKind::Object(shape) => match shape.type_tag {
                Some(tag) => format!("object ({})", tag),
                None => "object".to_string(),
            },
            FieldKind::Array { item, .. } => format!("list of {}", item.describe()),
            FieldKind::Union(kinds) => kinds
                .iter()
                .map(FieldKind::describe)
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }
}

/// A nested object with an optional fixed `@type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectShape {
    pub type_tag: Option<&'static str>,
    pub fields: &'static [FieldSpec],
}

/// One field in a contract or object shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Form label shown next to the input.
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Message reported when a required field is absent or empty.
    pub message: &'static str,
}

const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required: false,
        message: "Required",
    }
}

const fn required(
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    message: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required: true,
        message,
    }
}

/// Validation contract for one schema type.
#[derive(Debug, PartialEq, Eq)]
pub struct SchemaContract {
    pub schema_type: SchemaType,
    pub fields: &'static [FieldSpec],
}

impl SchemaContract {
    /// Look up a field by dot path, descending into nested shapes.
    ///
    /// Numeric segments (list indexes) are skipped, so `mainEntity.0.name`
    /// and `mainEntity.name` resolve to the same spec.
    pub fn field(&self, path: &str) -> Option<&'static FieldSpec> {
        let segments: Vec<&str> = path.split('.').collect();
        find_field(self.fields, &segments)
    }

    /// Every field with its display path, depth-first in table order.
    ///
    /// List items are written as `name[]`; union alternatives that share a
    /// path are listed once.
    pub fn flatten(&self) -> Vec<(String, &'static FieldSpec)> {
        let mut out = Vec::new();
        flatten_fields(self.fields, "", &mut out);
        out
    }

    /// Names of the required top-level fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().filter(|f| f.required).map(|f| f.name)
    }
}

fn find_field(fields: &'static [FieldSpec], segments: &[&str]) -> Option<&'static FieldSpec> {
    let (head, rest) = segments.split_first()?;
    let spec = fields.iter().find(|f| f.name == *head)?;
    if rest.is_empty() {
        return Some(spec);
    }
    find_in_kind(&spec.kind, rest)
}

fn find_in_kind(kind: &'static FieldKind, segments: &[&str]) -> Option<&'static FieldSpec> {
    match kind {
        FieldKind::Object(shape) => find_field(shape.fields, segments),
        FieldKind::Array { item, .. } => {
            let rest = match segments.split_first() {
                Some((head, rest)) if head.parse::<usize>().is_ok() => rest,
                _ => segments,
            };
            if rest.is_empty() {
                return None;
            }
            find_in_kind(item, rest)
        }
        FieldKind::Union(kinds) => kinds.iter().find_map(|k| find_in_kind(k, segments)),
        _ => None,
    }
}

fn flatten_fields(
    fields: &'static [FieldSpec],
    prefix: &str,
    out: &mut Vec<(String, &'static FieldSpec)>,
) {
    for spec in fields {
        let path = format!("{}{}", prefix, spec.name);
        if out.iter().any(|(p, _)| *p == path) {
            continue;
        }
        out.push((path.clone(), spec));
        flatten_kind(&spec.kind, &path, out);
    }
}

fn flatten_kind(kind: &'static FieldKind, path: &str, out: &mut Vec<(String, &'static FieldSpec)>) {
    match kind {
        FieldKind::Object(shape) => flatten_fields(shape.fields, &format!("{}.", path), out),
        FieldKind::Array { item, .. } => flatten_kind(item, &format!("{}[]", path), out),
        FieldKind::Union(kinds) => {
            for k in kinds.iter() {
                flatten_kind(k, path, out);
            }
        }
        _ => {}
    }
}

/// Look up the contract for a type identifier.
///
/// # Errors
///
/// Returns `LookupError::UnknownType` if `type_id` is not one of the
/// supported identifiers.
pub fn get_contract(type_id: &str) -> Result<&'static SchemaContract, LookupError> {
    let schema_type: SchemaType = type_id.parse()?;
    Ok(schema_type.contract())
}

impl SchemaType {
    /// The static contract for this type.
    pub fn contract(self) -> &'static SchemaContract {
        match self {
            SchemaType::Organization => &ORGANIZATION,
            SchemaType::Article => &ARTICLE,
            SchemaType::Product => &PRODUCT,
            SchemaType::LocalBusiness => &LOCAL_BUSINESS,
            SchemaType::Event => &EVENT,
            SchemaType::FaqPage => &FAQ_PAGE,
            SchemaType::BreadcrumbList => &BREADCRUMB_LIST,
            SchemaType::JobPosting => &JOB_POSTING,
            SchemaType::Person => &PERSON,
            SchemaType::VideoObject => &VIDEO_OBJECT,
        }
    }
}

// --- Shared shapes ---

static AVAILABILITY: [&str; 3] = [
    "https://schema.org/InStock",
    "https://schema.org/OutOfStock",
    "https://schema.org/PreOrder",
];

static POSTAL_ADDRESS_FIELDS: [FieldSpec; 5] = [
    optional("streetAddress", "Street Address", FieldKind::Text),
    optional("addressLocality", "City", FieldKind::Text),
    optional("addressRegion", "State/Region", FieldKind::Text),
    optional("postalCode", "Postal Code", FieldKind::Text),
    optional("addressCountry", "Country", FieldKind::Text),
];

static POSTAL_ADDRESS: ObjectShape = ObjectShape {
    type_tag: Some("PostalAddress"),
    fields: &POSTAL_ADDRESS_FIELDS,
};

static CONTACT_POINT_FIELDS: [FieldSpec; 3] = [
    optional("telephone", "Telephone", FieldKind::Text),
    optional("contactType", "Contact Type", FieldKind::Text),
    optional("email", "Email", FieldKind::Email),
];

static CONTACT_POINT: ObjectShape = ObjectShape {
    type_tag: Some("ContactPoint"),
    fields: &CONTACT_POINT_FIELDS,
};

static OFFER_FIELDS: [FieldSpec; 4] = [
    optional("price", "Price", FieldKind::Number),
    optional("priceCurrency", "Currency", FieldKind::Text),
    optional(
        "availability",
        "Availability",
        FieldKind::Enumerated(&AVAILABILITY),
    ),
    optional("url", "Offer URL", FieldKind::Url),
];

static OFFER: ObjectShape = ObjectShape {
    type_tag: Some("Offer"),
    fields: &OFFER_FIELDS,
};

static AGGREGATE_RATING_FIELDS: [FieldSpec; 2] = [
    optional("ratingValue", "Rating", FieldKind::Number),
    optional("reviewCount", "Review Count", FieldKind::Number),
];

static AGGREGATE_RATING: ObjectShape = ObjectShape {
    type_tag: Some("AggregateRating"),
    fields: &AGGREGATE_RATING_FIELDS,
};

static GEO_COORDINATES_FIELDS: [FieldSpec; 2] = [
    optional("latitude", "Latitude", FieldKind::Number),
    optional("longitude", "Longitude", FieldKind::Number),
];

static GEO_COORDINATES: ObjectShape = ObjectShape {
    type_tag: Some("GeoCoordinates"),
    fields: &GEO_COORDINATES_FIELDS,
};

static NAME_ONLY_FIELDS: [FieldSpec; 1] = [optional("name", "Name", FieldKind::Text)];

static PERSON_NAME: ObjectShape = ObjectShape {
    type_tag: Some("Person"),
    fields: &NAME_ONLY_FIELDS,
};

static ORGANIZATION_NAME: ObjectShape = ObjectShape {
    type_tag: Some("Organization"),
    fields: &NAME_ONLY_FIELDS,
};

static PERSON_OR_ORGANIZATION: [FieldKind; 2] = [
    FieldKind::Object(&PERSON_NAME),
    FieldKind::Object(&ORGANIZATION_NAME),
];

static IMAGE_OBJECT_FIELDS: [FieldSpec; 1] = [optional("url", "Logo URL", FieldKind::Url)];

static IMAGE_OBJECT: ObjectShape = ObjectShape {
    type_tag: Some("ImageObject"),
    fields: &IMAGE_OBJECT_FIELDS,
};

static PUBLISHER_FIELDS: [FieldSpec; 2] = [
    optional("name", "Publisher Name", FieldKind::Text),
    optional("logo", "Publisher Logo", FieldKind::Object(&IMAGE_OBJECT)),
];

static PUBLISHER: ObjectShape = ObjectShape {
    type_tag: Some("Organization"),
    fields: &PUBLISHER_FIELDS,
};

static IMAGE_URLS: [FieldKind; 2] = [
    FieldKind::Url,
    FieldKind::Array {
        item: &FieldKind::Url,
        min_items: 0,
    },
];

static PLACE_FIELDS: [FieldSpec; 2] = [
    optional("name", "Venue Name", FieldKind::Text),
    optional("address", "Venue Address", FieldKind::Object(&POSTAL_ADDRESS)),
];

static PLACE: ObjectShape = ObjectShape {
    type_tag: Some("Place"),
    fields: &PLACE_FIELDS,
};

static EVENT_LOCATION: [FieldKind; 2] = [
    FieldKind::Object(&POSTAL_ADDRESS),
    FieldKind::Object(&PLACE),
];

// --- Organization ---

static ORGANIZATION_FIELDS: [FieldSpec; 9] = [
    required("name", "Organization Name", FieldKind::Text, "Name is required"),
    optional("url", "Website URL", FieldKind::Url),
    optional("logo", "Logo URL", FieldKind::Url),
    optional("description", "Description", FieldKind::Text),
    optional("address", "Address", FieldKind::Object(&POSTAL_ADDRESS)),
    optional("contactPoint", "Contact Point", FieldKind::Object(&CONTACT_POINT)),
    optional(
        "sameAs",
        "Profile URLs",
        FieldKind::Array {
            item: &FieldKind::Url,
            min_items: 0,
        },
    ),
    optional("foundingDate", "Founding Date", FieldKind::Text),
    optional("numberOfEmployees", "Number of Employees", FieldKind::Text),
];

static ORGANIZATION: SchemaContract = SchemaContract {
    schema_type: SchemaType::Organization,
    fields: &ORGANIZATION_FIELDS,
};

// --- Article ---

static ARTICLE_FIELDS: [FieldSpec; 10] = [
    required("headline", "Headline", FieldKind::Text, "Headline is required"),
    optional("description", "Description", FieldKind::Text),
    optional("image", "Image URL", FieldKind::Union(&IMAGE_URLS)),
    optional("author", "Author", FieldKind::Object(&PERSON_NAME)),
    optional("publisher", "Publisher", FieldKind::Object(&PUBLISHER)),
    required(
        "datePublished",
        "Date Published",
        FieldKind::Date,
        "Date published is required",
    ),
    optional("dateModified", "Date Modified", FieldKind::Date),
    optional("articleBody", "Article Body", FieldKind::Text),
    optional("articleSection", "Article Section", FieldKind::Text),
    optional("keywords", "Keywords", FieldKind::Text),
];

static ARTICLE: SchemaContract = SchemaContract {
    schema_type: SchemaType::Article,
    fields: &ARTICLE_FIELDS,
};

// --- Product ---

static PRODUCT_FIELDS: [FieldSpec; 9] = [
    required("name", "Product Name", FieldKind::Text, "Name is required"),
    required(
        "description",
        "Description",
        FieldKind::Text,
        "Description is required",
    ),
    optional("image", "Image URL", FieldKind::Union(&IMAGE_URLS)),
    optional("brand", "Brand", FieldKind::Text),
    optional("sku", "SKU", FieldKind::Text),
    optional("gtin", "GTIN", FieldKind::Text),
    optional("category", "Category", FieldKind::Text),
    required(
        "offers",
        "Offer Details",
        FieldKind::Object(&OFFER),
        "Offer details are required",
    ),
    optional(
        "aggregateRating",
        "Aggregate Rating",
        FieldKind::Object(&AGGREGATE_RATING),
    ),
];

static PRODUCT: SchemaContract = SchemaContract {
    schema_type: SchemaType::Product,
    fields: &PRODUCT_FIELDS,
};

// --- LocalBusiness ---

static LOCAL_BUSINESS_FIELDS: [FieldSpec; 11] = [
    required("name", "Business Name", FieldKind::Text, "Name is required"),
    optional("description", "Description", FieldKind::Text),
    optional("image", "Image URL", FieldKind::Union(&IMAGE_URLS)),
    optional("telephone", "Phone Number", FieldKind::Text),
    optional("priceRange", "Price Range", FieldKind::Text),
    required(
        "address",
        "Address",
        FieldKind::Object(&POSTAL_ADDRESS),
        "Address is required",
    ),
    optional("geo", "Coordinates", FieldKind::Object(&GEO_COORDINATES)),
    optional("openingHours", "Opening Hours", FieldKind::Text),
    optional(
        "aggregateRating",
        "Aggregate Rating",
        FieldKind::Object(&AGGREGATE_RATING),
    ),
    optional("servesCuisine", "Cuisine", FieldKind::Text),
    optional("menu", "Menu URL", FieldKind::Url),
];

static LOCAL_BUSINESS: SchemaContract = SchemaContract {
    schema_type: SchemaType::LocalBusiness,
    fields: &LOCAL_BUSINESS_FIELDS,
};

// --- Event ---

static EVENT_FIELDS: [FieldSpec; 10] = [
    required("name", "Event Name", FieldKind::Text, "Name is required"),
    optional("description", "Description", FieldKind::Text),
    optional("image", "Image URL", FieldKind::Union(&IMAGE_URLS)),
    required(
        "startDate",
        "Start Date",
        FieldKind::Date,
        "Start date is required",
    ),
    optional("endDate", "End Date", FieldKind::Date),
    optional("location", "Location", FieldKind::Union(&EVENT_LOCATION)),
    optional(
        "organizer",
        "Organizer",
        FieldKind::Union(&PERSON_OR_ORGANIZATION),
    ),
    optional("offers", "Tickets", FieldKind::Object(&OFFER)),
    optional("eventStatus", "Event Status", FieldKind::Text),
    optional("eventAttendanceMode", "Attendance Mode", FieldKind::Text),
];

static EVENT: SchemaContract = SchemaContract {
    schema_type: SchemaType::Event,
    fields: &EVENT_FIELDS,
};

// --- FAQPage ---

static ANSWER_FIELDS: [FieldSpec; 1] = [required(
    "text",
    "Answer",
    FieldKind::Text,
    "Answer is required",
)];

static ANSWER: ObjectShape = ObjectShape {
    type_tag: Some("Answer"),
    fields: &ANSWER_FIELDS,
};

static QUESTION_FIELDS: [FieldSpec; 2] = [
    required("name", "Question", FieldKind::Text, "Question is required"),
    required(
        "acceptedAnswer",
        "Accepted Answer",
        FieldKind::Object(&ANSWER),
        "Answer is required",
    ),
];

static QUESTION: ObjectShape = ObjectShape {
    type_tag: Some("Question"),
    fields: &QUESTION_FIELDS,
};

static QUESTION_ITEM: FieldKind = FieldKind::Object(&QUESTION);

static FAQ_PAGE_FIELDS: [FieldSpec; 1] = [required(
    "mainEntity",
    "Questions",
    FieldKind::Array {
        item: &QUESTION_ITEM,
        min_items: 1,
    },
    "At least one question is required",
)];

static FAQ_PAGE: SchemaContract = SchemaContract {
    schema_type: SchemaType::FaqPage,
    fields: &FAQ_PAGE_FIELDS,
};

// --- BreadcrumbList ---

static LIST_ITEM_FIELDS: [FieldSpec; 3] = [
    required(
        "position",
        "Position",
        FieldKind::PositiveInteger,
        "Position is required",
    ),
    required("name", "Name", FieldKind::Text, "Name is required"),
    optional("item", "URL", FieldKind::Url),
];

static LIST_ITEM: ObjectShape = ObjectShape {
    type_tag: Some("ListItem"),
    fields: &LIST_ITEM_FIELDS,
};

static LIST_ITEM_KIND: FieldKind = FieldKind::Object(&LIST_ITEM);

static BREADCRUMB_LIST_FIELDS: [FieldSpec; 1] = [required(
    "itemListElement",
    "Breadcrumbs",
    FieldKind::Array {
        item: &LIST_ITEM_KIND,
        min_items: 1,
    },
    "At least one item is required",
)];

static BREADCRUMB_LIST: SchemaContract = SchemaContract {
    schema_type: SchemaType::BreadcrumbList,
    fields: &BREADCRUMB_LIST_FIELDS,
};

// --- JobPosting ---

static HIRING_ORGANIZATION_FIELDS: [FieldSpec; 1] = [required(
    "name",
    "Organization Name",
    FieldKind::Text,
    "Organization name is required",
)];

static HIRING_ORGANIZATION: ObjectShape = ObjectShape {
    type_tag: Some("Organization"),
    fields: &HIRING_ORGANIZATION_FIELDS,
};

static JOB_LOCATION_FIELDS: [FieldSpec; 1] = [optional(
    "address",
    "Address",
    FieldKind::Object(&POSTAL_ADDRESS),
)];

static JOB_LOCATION: ObjectShape = ObjectShape {
    type_tag: Some("Place"),
    fields: &JOB_LOCATION_FIELDS,
};

static QUANTITATIVE_VALUE_FIELDS: [FieldSpec; 2] = [
    optional("value", "Amount", FieldKind::Number),
    optional("unitText", "Unit", FieldKind::Text),
];

static QUANTITATIVE_VALUE: ObjectShape = ObjectShape {
    type_tag: Some("QuantitativeValue"),
    fields: &QUANTITATIVE_VALUE_FIELDS,
};

static MONETARY_AMOUNT_FIELDS: [FieldSpec; 2] = [
    optional("currency", "Currency", FieldKind::Text),
    optional("value", "Value", FieldKind::Object(&QUANTITATIVE_VALUE)),
];

static MONETARY_AMOUNT: ObjectShape = ObjectShape {
    type_tag: Some("MonetaryAmount"),
    fields: &MONETARY_AMOUNT_FIELDS,
};

static JOB_POSTING_FIELDS: [FieldSpec; 11] = [
    required("title", "Job Title", FieldKind::Text, "Title is required"),
    required(
        "description",
        "Description",
        FieldKind::Text,
        "Description is required",
    ),
    required(
        "datePosted",
        "Date Posted",
        FieldKind::Date,
        "Date posted is required",
    ),
    required(
        "employmentType",
        "Employment Type",
        FieldKind::Text,
        "Employment type is required",
    ),
    required(
        "hiringOrganization",
        "Hiring Organization",
        FieldKind::Object(&HIRING_ORGANIZATION),
        "Organization name is required",
    ),
    optional("jobLocation", "Job Location", FieldKind::Object(&JOB_LOCATION)),
    optional("baseSalary", "Base Salary", FieldKind::Object(&MONETARY_AMOUNT)),
    optional("validThrough", "Valid Through", FieldKind::Date),
    optional("workHours", "Work Hours", FieldKind::Text),
    optional("qualifications", "Qualifications", FieldKind::Text),
    optional("skills", "Skills", FieldKind::Text),
];

static JOB_POSTING: SchemaContract = SchemaContract {
    schema_type: SchemaType::JobPosting,
    fields: &JOB_POSTING_FIELDS,
};

// --- Person ---

static PERSON_FIELDS: [FieldSpec; 10] = [
    required("name", "Name", FieldKind::Text, "Name is required"),
    optional("jobTitle", "Job Title", FieldKind::Text),
    optional("description", "Description", FieldKind::Text),
    optional("image", "Image URL", FieldKind::Url),
    optional("email", "Email", FieldKind::Email),
    optional("telephone", "Telephone", FieldKind::Text),
    optional("url", "Website URL", FieldKind::Url),
    optional(
        "sameAs",
        "Profile URLs",
        FieldKind::Array {
            item: &FieldKind::Url,
            min_items: 0,
        },
    ),
    optional("worksFor", "Works For", FieldKind::Object(&ORGANIZATION_NAME)),
    optional("alumniOf", "Alumni Of", FieldKind::Text),
];

static PERSON: SchemaContract = SchemaContract {
    schema_type: SchemaType::Person,
    fields: &PERSON_FIELDS,
};

// --- VideoObject ---

static VIDEO_OBJECT_FIELDS: [FieldSpec; 9] = [
    required("name", "Video Title", FieldKind::Text, "Name is required"),
    required(
        "description",
        "Description",
        FieldKind::Text,
        "Description is required",
    ),
    required(
        "thumbnailUrl",
        "Thumbnail URL",
        FieldKind::Url,
        "Thumbnail URL is required",
    ),
    required(
        "uploadDate",
        "Upload Date",
        FieldKind::Date,
        "Upload date is required",
    ),
    optional("contentUrl", "Content URL", FieldKind::Url),
    optional("embedUrl", "Embed URL", FieldKind::Url),
    optional("duration", "Duration", FieldKind::Text),
    optional("publisher", "Publisher", FieldKind::Object(&ORGANIZATION_NAME)),
    optional(
        "author",
        "Author",
        FieldKind::Union(&PERSON_OR_ORGANIZATION),
    ),
];

static VIDEO_OBJECT: SchemaContract = SchemaContract {
    schema_type: SchemaType::VideoObject,
    fields: &VIDEO_OBJECT_FIELDS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_its_own_contract() {
        for t in SchemaType::ALL {
            let contract = t.contract();
            assert_eq!(contract.schema_type, t);
            assert!(!contract.fields.is_empty());
        }
    }

    #[test]
    fn get_contract_by_identifier() {
        let contract = get_contract("FAQPage").unwrap();
        assert_eq!(contract.schema_type, SchemaType::FaqPage);
    }

    #[test]
    fn get_contract_unknown_identifier() {
        let err = get_contract("Recipe").unwrap_err();
        assert_eq!(
            err,
            LookupError::UnknownType {
                type_id: "Recipe".into()
            }
        );
    }

    #[test]
    fn field_names_unique_per_table() {
        for t in SchemaType::ALL {
            let names: Vec<_> = t.contract().fields.iter().map(|f| f.name).collect();
            let mut deduped = names.clone();
            deduped.sort_unstable();
            deduped.dedup();
            assert_eq!(names.len(), deduped.len(), "duplicate field in {}", t);
        }
    }

    fn names(t: SchemaType) -> Vec<&'static str> {
        t.contract().fields.iter().map(|f| f.name).collect()
    }

    #[test]
    fn article_and_job_posting_field_tables() {
        assert_eq!(
            names(SchemaType::Article),
            vec![
                "headline",
                "description",
                "image",
                "author",
                "publisher",
                "datePublished",
                "dateModified",
                "articleBody",
                "articleSection",
                "keywords",
            ]
        );
        assert_eq!(
            names(SchemaType::JobPosting),
            vec![
                "title",
                "description",
                "datePosted",
                "employmentType",
                "hiringOrganization",
                "jobLocation",
                "baseSalary",
                "validThrough",
                "workHours",
                "qualifications",
                "skills",
            ]
        );
    }

    #[test]
    fn organization_requires_only_name() {
        let required: Vec<_> = SchemaType::Organization.contract().required_fields().collect();
        assert_eq!(required, vec!["name"]);
    }

    #[test]
    fn field_lookup_descends_into_objects() {
        let contract = SchemaType::Product.contract();
        let spec = contract.field("offers.url").unwrap();
        assert_eq!(spec.kind, FieldKind::Url);
        assert!(contract.field("offers.missing").is_none());
        assert!(contract.field("name.first").is_none());
    }

    #[test]
    fn field_lookup_skips_list_indexes() {
        let contract = SchemaType::FaqPage.contract();
        let by_index = contract.field("mainEntity.0.acceptedAnswer.text").unwrap();
        let without = contract.field("mainEntity.acceptedAnswer.text").unwrap();
        assert_eq!(by_index, without);
        assert!(by_index.required);
    }

    #[test]
    fn field_lookup_searches_union_alternatives() {
        let contract = SchemaType::Event.contract();
        assert!(contract.field("location.streetAddress").is_some());
        assert!(contract.field("location.address.postalCode").is_some());
    }

    #[test]
    fn flatten_lists_nested_paths_once() {
        let paths: Vec<String> = SchemaType::VideoObject
            .contract()
            .flatten()
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        assert!(paths.contains(&"publisher.name".to_string()));
        assert_eq!(paths.iter().filter(|p| *p == "author.name").count(), 1);

        let paths: Vec<String> = SchemaType::BreadcrumbList
            .contract()
            .flatten()
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        assert!(paths.contains(&"itemListElement[].position".to_string()));
    }

    #[test]
    fn describe_kinds() {
        assert_eq!(FieldKind::Url.describe(), "url");
        assert_eq!(
            FieldKind::Union(&IMAGE_URLS).describe(),
            "url | list of url"
        );
        assert_eq!(FieldKind::Object(&OFFER).describe(), "object (Offer)");
    }
}
