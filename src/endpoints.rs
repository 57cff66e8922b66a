//! Endpoint registry.
//!
//! The URLs the application needs are discovered once from the API root
//! document and collected into an [`Endpoints`] value. That value is built
//! in full before anything reads it and is then handed down to the views,
//! so a reader can never see half of a bootstrap pass.

use std::collections::BTreeMap;
use std::fmt;

use crate::mason::{ControlName, Controls, Namespace};

/// Logical names of the root-level endpoints the application uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Endpoint {
    MoviesAll,
    UsersAll,
    CategoriesAll,
    AddMovie,
    AddUser,
    AddCategory,
    Login,
    CurrentUser,
}

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::MoviesAll,
        Endpoint::UsersAll,
        Endpoint::CategoriesAll,
        Endpoint::AddMovie,
        Endpoint::AddUser,
        Endpoint::AddCategory,
        Endpoint::Login,
        Endpoint::CurrentUser,
    ];

    /// The root control this endpoint is read from.
    pub fn control(&self) -> ControlName {
        match self {
            Endpoint::MoviesAll => ControlName::MoviesAll,
            Endpoint::UsersAll => ControlName::UsersAll,
            Endpoint::CategoriesAll => ControlName::CategoriesAll,
            Endpoint::AddMovie => ControlName::AddMovie,
            Endpoint::AddUser => ControlName::AddUser,
            Endpoint::AddCategory => ControlName::AddCategory,
            Endpoint::Login => ControlName::Login,
            Endpoint::CurrentUser => ControlName::CurrentUser,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::MoviesAll => "moviesAll",
            Endpoint::UsersAll => "usersAll",
            Endpoint::CategoriesAll => "categoriesAll",
            Endpoint::AddMovie => "addMovie",
            Endpoint::AddUser => "addUser",
            Endpoint::AddCategory => "addCategory",
            Endpoint::Login => "login",
            Endpoint::CurrentUser => "currentUser",
        };
        f.write_str(name)
    }
}

/// Update applied through [`Endpoints::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointAction {
    /// Fill an endpoint that has not been resolved yet.
    Set { endpoint: Endpoint, url: String },
    /// Overwrite an endpoint, resolved or not.
    Replace { endpoint: Endpoint, url: String },
}

/// Resolved endpoint URLs, keyed by logical name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    urls: BTreeMap<Endpoint, String>,
}

impl Endpoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from a root document's controls.
    ///
    /// Missing controls leave their endpoint unresolved.
    pub fn from_controls(controls: &Controls, namespace: &Namespace) -> Self {
        let mut endpoints = Endpoints::new();
        for endpoint in Endpoint::ALL {
            match controls.href(namespace, endpoint.control()) {
                Some(href) => {
                    endpoints.set(endpoint, href);
                }
                None => log::warn!(
                    "Root document offers no '{}' control; {endpoint} unavailable",
                    namespace.key(endpoint.control())
                ),
            }
        }
        endpoints
    }

    pub fn get(&self, endpoint: Endpoint) -> Option<&str> {
        self.urls.get(&endpoint).map(String::as_str)
    }

    pub fn is_available(&self, endpoint: Endpoint) -> bool {
        self.urls.contains_key(&endpoint)
    }

    /// Store a URL for an unresolved endpoint.
    ///
    /// Returns `false` and keeps the existing value if the endpoint was
    /// already resolved.
    pub fn set(&mut self, endpoint: Endpoint, url: impl Into<String>) -> bool {
        self.dispatch(EndpointAction::Set {
            endpoint,
            url: url.into(),
        })
    }

    /// Apply an update. Returns whether the registry changed.
    pub fn dispatch(&mut self, action: EndpointAction) -> bool {
        match action {
            EndpointAction::Set { endpoint, url } => {
                if self.urls.contains_key(&endpoint) {
                    log::debug!("{endpoint} already resolved, ignoring {url}");
                    return false;
                }
                self.urls.insert(endpoint, url);
                true
            }
            EndpointAction::Replace { endpoint, url } => {
                self.urls.insert(endpoint, url.clone()) != Some(url)
            }
        }
    }

    /// Number of resolved endpoints.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Every known endpoint with its URL, unresolved ones as `None`.
    pub fn entries(&self) -> impl Iterator<Item = (Endpoint, Option<&str>)> {
        Endpoint::ALL.into_iter().map(|e| (e, self.get(e)))
    }
}
