//! Mason hypermedia documents.
//!
//! Every API response is a JSON object with arbitrary domain fields plus
//! an optional `@controls` object. Each control is a named link the client
//! may follow:
//!
//! ```text
//! {
//!   "title": "Alien",
//!   "@namespaces": { "moviereviewmeta": { "name": "/api/link-relations/" } },
//!   "@controls": {
//!     "self": { "href": "/api/movies/1/" },
//!     "moviereviewmeta:reviews-for-movie": { "href": "/api/movies/1/reviews/" }
//!   }
//! }
//! ```
//!
//! A control that is missing means the capability is not offered right now.
//! Lookups therefore return `Option` and never fail; entries that do not
//! parse as a control (no `href`, wrong type) are dropped on decode.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Namespace prefix the movie review API uses for its link relations.
pub const DEFAULT_NAMESPACE: &str = "moviereviewmeta";

/// A single hypermedia control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(
        default,
        rename = "schemaUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_url: Option<String>,
}

impl Control {
    pub fn get(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            method: None,
            encoding: None,
            title: None,
            schema: None,
            schema_url: None,
        }
    }

    /// HTTP method, `GET` when the control does not say.
    pub fn method(&self) -> &str {
        self.method.as_deref().unwrap_or("GET")
    }
}

/// The `@controls` map of a document, keyed by full control name.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Controls(BTreeMap<String, Control>);

impl<'de> Deserialize<'de> for Controls {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let controls = raw
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value::<Control>(value) {
                Ok(control) => Some((key, control)),
                Err(err) => {
                    log::debug!("Ignoring unusable control '{key}': {err}");
                    None
                }
            })
            .collect();
        Ok(Controls(controls))
    }
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, control: Control) {
        self.0.insert(key.into(), control);
    }

    /// Look up a control by its full key (`"moviereviewmeta:login"`, `"self"`).
    pub fn get(&self, key: &str) -> Option<&Control> {
        self.0.get(key)
    }

    /// Look up a known control under the given namespace.
    pub fn find(&self, namespace: &Namespace, name: ControlName) -> Option<&Control> {
        self.get(&namespace.key(name))
    }

    /// The `href` of a known control, if offered.
    pub fn href(&self, namespace: &Namespace, name: ControlName) -> Option<&str> {
        self.find(namespace, name).map(|c| c.href.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Control)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Link relations this client knows how to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlName {
    MoviesAll,
    UsersAll,
    CategoriesAll,
    AddMovie,
    AddUser,
    AddCategory,
    Login,
    CurrentUser,
    ReviewsForMovie,
    SelfLink,
    Collection,
    Edit,
    Delete,
}

impl ControlName {
    /// Bare relation name without namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlName::MoviesAll => "movies-all",
            ControlName::UsersAll => "users-all",
            ControlName::CategoriesAll => "categories-all",
            ControlName::AddMovie => "add-movie",
            ControlName::AddUser => "add-user",
            ControlName::AddCategory => "add-category",
            ControlName::Login => "login",
            ControlName::CurrentUser => "current-user",
            ControlName::ReviewsForMovie => "reviews-for-movie",
            ControlName::SelfLink => "self",
            ControlName::Collection => "collection",
            ControlName::Edit => "edit",
            ControlName::Delete => "delete",
        }
    }

    /// IANA relations (`self`, `collection`, `edit`) carry no prefix.
    pub fn is_namespaced(&self) -> bool {
        !matches!(
            self,
            ControlName::SelfLink | ControlName::Collection | ControlName::Edit
        )
    }
}

impl fmt::Display for ControlName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application namespace used to form full control keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(prefix: impl Into<String>) -> Self {
        Namespace(prefix.into())
    }

    pub fn prefix(&self) -> &str {
        &self.0
    }

    /// Full key for a control, e.g. `x:movies-all` or `self`.
    pub fn key(&self, name: ControlName) -> String {
        if name.is_namespaced() {
            format!("{}:{}", self.0, name.as_str())
        } else {
            name.as_str().to_string()
        }
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Namespace::new(DEFAULT_NAMESPACE)
    }
}

/// Declaration inside `@namespaces`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceDecl {
    pub name: String,
}

/// A document with typed domain fields and its controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasonDoc<T> {
    #[serde(flatten)]
    pub body: T,
    #[serde(rename = "@controls", default, deserialize_with = "controls_or_empty")]
    pub controls: Controls,
    #[serde(
        rename = "@namespaces",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub namespaces: BTreeMap<String, NamespaceDecl>,
}

impl<T> MasonDoc<T> {
    pub fn new(body: T) -> Self {
        Self {
            body,
            controls: Controls::new(),
            namespaces: BTreeMap::new(),
        }
    }

    pub fn with_control(mut self, key: impl Into<String>, control: Control) -> Self {
        self.controls.insert(key, control);
        self
    }

    /// URL of the document itself, from its `self` control.
    pub fn self_href(&self) -> Option<&str> {
        self.controls.get(ControlName::SelfLink.as_str()).map(|c| c.href.as_str())
    }
}

/// A `null` control map offers nothing, same as a missing one.
fn controls_or_empty<'de, D>(deserializer: D) -> Result<Controls, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Controls>::deserialize(deserializer)?.unwrap_or_default())
}

/// A document whose domain fields are left untyped.
pub type Document = MasonDoc<Map<String, Value>>;

/// Collection bodies (`{"items": [...]}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    #[serde(default)]
    pub items: Vec<MasonDoc<T>>,
}

/// Extract the human-readable message from an error body.
///
/// The API answers errors either in Mason form
/// (`{"@error": {"@message": "...", "@messages": [...]}}`) or as a plain
/// `{"message": "..."}` object.
pub fn error_message(body: &Value) -> Option<String> {
    if let Some(error) = body.get("@error") {
        let message = error.get("@message").and_then(Value::as_str);
        let details: Vec<&str> = error
            .get("@messages")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        return match (message, details.is_empty()) {
            (Some(message), true) => Some(message.to_string()),
            (Some(message), false) => Some(format!("{message}: {}", details.join(", "))),
            (None, false) => Some(details.join(", ")),
            (None, true) => None,
        };
    }
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Movie;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Titled {
        title: String,
    }

    #[test]
    fn test_namespace_key() {
        let ns = Namespace::new("x");
        assert_eq!(ns.key(ControlName::MoviesAll), "x:movies-all");
        assert_eq!(ns.key(ControlName::SelfLink), "self");
        assert_eq!(ns.key(ControlName::Delete), "x:delete");
    }

    #[test]
    fn test_decode_document_with_controls() {
        let doc: MasonDoc<Titled> = serde_json::from_value(json!({
            "title": "Alien",
            "@namespaces": { "x": { "name": "/api/link-relations/" } },
            "@controls": {
                "self": { "href": "/api/movies/1/" },
                "x:reviews-for-movie": { "href": "/api/movies/1/reviews/", "method": "GET" }
            }
        }))
        .unwrap();

        let ns = Namespace::new("x");
        assert_eq!(doc.body.title, "Alien");
        assert_eq!(doc.self_href(), Some("/api/movies/1/"));
        assert_eq!(
            doc.controls.href(&ns, ControlName::ReviewsForMovie),
            Some("/api/movies/1/reviews/")
        );
        assert_eq!(doc.namespaces["x"].name, "/api/link-relations/");
    }

    #[test]
    fn test_missing_controls_is_empty() {
        let doc: MasonDoc<Titled> = serde_json::from_value(json!({ "title": "Alien" })).unwrap();
        assert!(doc.controls.is_empty());
        assert_eq!(doc.self_href(), None);
    }

    #[test]
    fn test_unusable_control_dropped() {
        let controls: Controls = serde_json::from_value(json!({
            "x:login": { "href": "/api/login/" },
            "x:broken": { "method": "POST" },
            "x:weird": "not an object"
        }))
        .unwrap();
        assert_eq!(controls.len(), 1);
        assert!(controls.get("x:broken").is_none());
        assert!(controls.get("x:weird").is_none());
    }

    #[test]
    fn test_control_method_defaults_to_get() {
        let mut control = Control::get("/api/movies/");
        assert_eq!(control.method(), "GET");
        control.method = Some("POST".to_string());
        assert_eq!(control.method(), "POST");
    }

    #[test]
    fn test_schema_url_decoded() {
        let control: Control = serde_json::from_value(json!({
            "href": "/api/movies/",
            "method": "POST",
            "encoding": "json",
            "schemaUrl": "/schemas/movie/"
        }))
        .unwrap();
        assert_eq!(control.encoding.as_deref(), Some("json"));
        assert_eq!(control.schema_url.as_deref(), Some("/schemas/movie/"));
    }

    #[test]
    fn test_collection_items() {
        let doc: MasonDoc<Collection<Titled>> = serde_json::from_value(json!({
            "items": [
                { "title": "A", "@controls": { "self": { "href": "/a/" } } },
                { "title": "B" }
            ]
        }))
        .unwrap();
        assert_eq!(doc.body.items.len(), 2);
        assert_eq!(doc.body.items[0].self_href(), Some("/a/"));
        assert_eq!(doc.body.items[1].self_href(), None);
    }

    #[test]
    fn test_null_controls_is_empty() {
        let doc: MasonDoc<Titled> =
            serde_json::from_value(json!({ "title": "Alien", "@controls": null })).unwrap();
        assert!(doc.controls.is_empty());
    }

    #[test]
    fn test_movie_collection_decodes() {
        let doc: MasonDoc<Collection<Movie>> = serde_json::from_value(json!({
            "items": [
                {
                    "id": 1,
                    "title": "Alien",
                    "length": 117,
                    "@controls": { "self": { "href": "/api/movies/1/" } }
                },
                { "id": 2, "title": "BigMan", "@controls": null }
            ],
            "@controls": { "self": { "href": "/api/movies/" } }
        }))
        .unwrap();
        assert_eq!(doc.self_href(), Some("/api/movies/"));
        assert_eq!(doc.body.items.len(), 2);
        assert_eq!(doc.body.items[0].body.title, "Alien");
        assert_eq!(doc.body.items[0].self_href(), Some("/api/movies/1/"));
        assert_eq!(doc.body.items[1].body.length, None);
    }

    #[test]
    fn test_collection_without_items() {
        let doc: MasonDoc<Collection<Movie>> = serde_json::from_value(json!({})).unwrap();
        assert!(doc.body.items.is_empty());
    }

    #[test]
    fn test_error_message_forms() {
        let mason = json!({ "@error": { "@message": "Not found", "@messages": ["no movie 7"] } });
        assert_eq!(error_message(&mason).unwrap(), "Not found: no movie 7");

        let plain = json!({ "message": "Forbidden" });
        assert_eq!(error_message(&plain).unwrap(), "Forbidden");

        assert_eq!(error_message(&json!({})), None);
    }
}
