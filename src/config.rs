//! Client configuration.

use crate::mason::{DEFAULT_NAMESPACE, Namespace};

/// Root document location used when nothing else is configured.
pub const DEFAULT_ROOT_URL: &str = "http://localhost:5000/api/";

/// Environment variable overriding the API root URL.
pub const ROOT_URL_VAR: &str = "MOVIE_API_ROOT";

/// Environment variable overriding the control namespace.
pub const NAMESPACE_VAR: &str = "MOVIE_API_NAMESPACE";

/// Where the API lives and how its controls are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// URL of the API root document. May be relative in the browser.
    pub root_url: String,
    pub namespace: Namespace,
}

impl ClientConfig {
    pub fn new(root_url: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
            namespace: Namespace::new(namespace),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::new(DEFAULT_ROOT_URL, DEFAULT_NAMESPACE)
    }
}
