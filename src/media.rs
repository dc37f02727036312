//! Image Resolver
//!
//! Finds a displayable image URL in heterogeneous tourism objects
//! (schema.org, DataTourisme, and search API rows wrapping either).
//! Extractors run in priority order over the object; the first URL that
//! passes [`is_image_url`] wins.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use wasm_bindgen::JsCast;

use crate::models::is_truthy;

/// Image shown when nothing usable is found
pub const DEFAULT_PLACEHOLDER: &str = "/static/img/no-image.jpg";

/// Marker attribute set once the fallback has been applied to an `<img>`
pub const FALLBACK_MARKER: &str = "data-fallback-applied";

static HTTP_SCHEME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^https?://").unwrap());
static IMAGE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpe?g|png|webp|gif)(\?|#|$)").unwrap());
static IMAGE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)image|photo|thumbnail|picture|illustration|logo").unwrap());

const DIRECT_KEYS: &[&str] = &[
    "image",
    "photo",
    "thumbnail",
    "picture",
    "cover",
    "logo",
    "https://schema.org/image",
    "https://schema.org/logo",
];

const REPRESENTATION_KEYS: &[&str] = &[
    "https://www.datatourisme.fr/ontology/core#hasMainRepresentation",
    "https://www.datatourisme.fr/ontology/core#hasRepresentation",
    "hasMainRepresentation",
    "hasRepresentation",
];

const RELATED_RESOURCE_KEYS: &[&str] = &["ebucore:hasRelatedResource", "hasRelatedResource"];
const LOCATOR_KEYS: &[&str] = &["ebucore:locator", "locator"];
const LOCATOR_FIELDS: &[&str] = &["url", "@id", "@value"];

const CONTENT_URL_KEYS: &[&str] = &[
    "contentUrl",
    "url",
    "@id",
    "https://schema.org/contentUrl",
    "https://schema.org/url",
];

/// Fields that may wrap a string inside an object, in lookup order
const WRAPPER_KEYS: &[&str] = &["@value", "value", "url", "@id"];

/// Absolute http(s) URL ending in a known image extension
pub fn is_image_url(url: &str) -> bool {
    HTTP_SCHEME.is_match(url) && IMAGE_EXTENSION.is_match(url)
}

/// One extraction strategy
pub trait ImageExtractor {
    fn extract(&self, obj: &Map<String, Value>) -> Option<String>;
}

/// Well-known direct fields (`image`, `photo`, schema.org variants, ...)
pub struct DirectFields;

/// DataTourisme representation -> related resource -> locator chain
pub struct Representations;

/// Objects inside any array property exposing `contentUrl`/`url`/`@id`
pub struct ArrayScan;

/// Any property whose key looks image-related
pub struct KeyPattern;

impl ImageExtractor for DirectFields {
    fn extract(&self, obj: &Map<String, Value>) -> Option<String> {
        DIRECT_KEYS
            .iter()
            .filter_map(|k| first_string(&[obj.get(*k)]))
            .find(|u| is_image_url(u))
    }
}

impl ImageExtractor for Representations {
    fn extract(&self, obj: &Map<String, Value>) -> Option<String> {
        for rep_key in REPRESENTATION_KEYS {
            for rep in as_slice(obj.get(*rep_key)) {
                for rel in collect_fields(rep, RELATED_RESOURCE_KEYS) {
                    for loc in collect_fields(rel, LOCATOR_KEYS) {
                        let candidate = match loc {
                            Value::String(s) => Some(s.clone()),
                            Value::Object(m) => first_string(&fields_of(m, LOCATOR_FIELDS)),
                            _ => None,
                        };
                        if let Some(url) = candidate.filter(|u| is_image_url(u)) {
                            return Some(url);
                        }
                    }
                }
            }
        }
        None
    }
}

impl ImageExtractor for ArrayScan {
    fn extract(&self, obj: &Map<String, Value>) -> Option<String> {
        obj.values()
            .filter_map(Value::as_array)
            .flatten()
            .filter_map(Value::as_object)
            .filter_map(|it| first_string(&fields_of(it, CONTENT_URL_KEYS)))
            .find(|u| is_image_url(u))
    }
}

impl ImageExtractor for KeyPattern {
    fn extract(&self, obj: &Map<String, Value>) -> Option<String> {
        obj.iter()
            .filter(|(k, _)| IMAGE_KEY.is_match(k))
            .filter_map(|(_, v)| first_string(&[Some(v)]))
            .find(|u| is_image_url(u))
    }
}

/// Extractors in priority order
pub const PIPELINE: [&(dyn ImageExtractor + Sync); 4] = [&DirectFields, &Representations, &ArrayScan, &KeyPattern];

/// Run the extractor pipeline over an object
pub fn extract_from_object(value: &Value) -> Option<String> {
    let obj = value.as_object()?;
    PIPELINE.iter().find_map(|ex| ex.extract(obj))
}

/// Best image URL for any item, or `placeholder`
pub fn best_image(item: &Value, placeholder: &str) -> String {
    let Some(obj) = item.as_object() else {
        return placeholder.to_string();
    };

    if let Some(Value::String(image)) = obj.get("image") {
        if is_image_url(image) {
            return image.clone();
        }
    }

    extract_from_object(item)
        .or_else(|| obj.get("raw").and_then(extract_from_object))
        .or_else(|| obj.get("data").and_then(extract_from_object))
        .unwrap_or_else(|| placeholder.to_string())
}

/// Swap a failed `<img>` to the placeholder, once per element
pub fn apply_fallback(ev: &web_sys::Event, placeholder: &str) {
    let Some(img) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlImageElement>().ok()) else {
        return;
    };
    if img.has_attribute(FALLBACK_MARKER) {
        return;
    }
    let _ = img.set_attribute(FALLBACK_MARKER, "1");
    img.set_src(placeholder);
}

fn as_slice(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => &[],
        Some(other) => std::slice::from_ref(other),
    }
}

/// Values under `keys` on an object, arrays flattened
fn collect_fields<'a>(value: &'a Value, keys: &[&str]) -> Vec<&'a Value> {
    let Some(obj) = value.as_object() else {
        return Vec::new();
    };
    keys.iter().flat_map(|k| as_slice(obj.get(*k))).collect()
}

fn fields_of<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Vec<Option<&'a Value>> {
    keys.iter().map(|k| obj.get(*k)).collect()
}

/// First non-blank string among candidates, looking one level into
/// arrays and wrapper objects
fn first_string(candidates: &[Option<&Value>]) -> Option<String> {
    candidates.iter().flatten().find_map(|v| match v {
        Value::String(s) => non_blank(s),
        Value::Array(items) => items.iter().find_map(|e| match e {
            Value::String(s) => non_blank(s),
            Value::Object(m) => wrapped_string(m),
            _ => None,
        }),
        Value::Object(m) => wrapped_string(m),
        _ => None,
    })
}

/// First truthy wrapper field, kept only when it is a non-blank string
fn wrapped_string(obj: &Map<String, Value>) -> Option<String> {
    match WRAPPER_KEYS.iter().filter_map(|k| obj.get(*k)).find(|v| is_truthy(v)) {
        Some(Value::String(s)) => non_blank(s),
        _ => None,
    }
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}
