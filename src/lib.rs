//! # moviereview-client
//!
//! Client for the movie review API, a Mason hypermedia service.
//!
//! The client hardcodes exactly one URL: the API root. Everything else is
//! discovered by following the links (controls) the server puts into its
//! documents.
//!
//! ## Overview
//!
//! - **Bootstrap**: fetch the root document once and build the
//!   [`Endpoints`] registry from its controls
//! - **Views**: each view fetches one URL taken from the registry or from a
//!   previously fetched document and moves `Loading -> Loaded | Errored`
//! - **Link-following**: a movie document carries the link to its reviews;
//!   the reviews are fetched only after the movie has loaded
//!
//! ## Example
//!
//! ```
//! use moviereview_client::{ControlName, Endpoint, Endpoints, MasonDoc, Namespace};
//! use serde_json::{Map, Value, json};
//!
//! let root: MasonDoc<Map<String, Value>> = serde_json::from_value(json!({
//!     "@controls": {
//!         "x:movies-all": { "href": "/movies" },
//!         "x:login": { "href": "/login" }
//!     }
//! }))
//! .unwrap();
//!
//! let ns = Namespace::new("x");
//! let endpoints = Endpoints::from_controls(&root.controls, &ns);
//!
//! assert_eq!(endpoints.get(Endpoint::MoviesAll), Some("/movies"));
//! assert_eq!(endpoints.get(Endpoint::CurrentUser), None);
//! assert_eq!(root.controls.href(&ns, ControlName::Login), Some("/login"));
//! ```

pub mod bootstrap;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod mason;
pub mod models;
pub mod route;
pub mod session;
pub mod view;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use bootstrap::{BootState, UNAVAILABLE_MESSAGE, bootstrap, resolve};
pub use config::ClientConfig;
pub use endpoints::{Endpoint, EndpointAction, Endpoints};
pub use error::FetchError;
pub use http::{HttpClient, get_doc, interpret_response, post_doc};
pub use mason::{Collection, Control, ControlName, Controls, Document, MasonDoc, Namespace};
pub use route::{Matched, NavState, Route};
pub use session::{AppAction, AppStore, SessionState};
pub use view::{DependentInput, MountGuard, Mounted, ViewState};

#[cfg(feature = "cli")]
pub use http::ReqwestClient;
