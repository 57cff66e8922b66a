//! Per-view load state.
//!
//! Every view goes `Loading -> Loaded | Errored` after being mounted with
//! its input URL. A view whose input URL is absent never fetches and sits
//! in `Unavailable`. Results that arrive after the view has gone away are
//! dropped through [`Mounted`].

use std::cell::Cell;
use std::rc::Rc;

use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::http::{HttpClient, get_doc};

/// Load state of a single view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// The URL the view needs is not offered; nothing was fetched.
    Unavailable,
    Loading,
    Loaded(T),
    /// The fetch failed; carries the message shown inline.
    Errored(String),
}

impl<T> ViewState<T> {
    /// Initial state for a view mounted with `url` as its input.
    pub fn for_input(url: Option<&str>) -> Self {
        match url {
            Some(_) => ViewState::Loading,
            None => ViewState::Unavailable,
        }
    }

    pub fn from_result(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => ViewState::Loaded(value),
            Err(err) => ViewState::Errored(err.user_message()),
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Input for a child view that depends on this view's data.
    ///
    /// Stays [`DependentInput::Pending`] until this view has loaded, so a
    /// child can never be started against missing parent data.
    pub fn child<U>(&self, select: impl FnOnce(&T) -> Option<U>) -> DependentInput<U> {
        match self {
            ViewState::Loaded(value) => match select(value) {
                Some(input) => DependentInput::Ready(input),
                None => DependentInput::Absent,
            },
            ViewState::Loading => DependentInput::Pending,
            ViewState::Unavailable | ViewState::Errored(_) => DependentInput::Absent,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            ViewState::Unavailable => ViewState::Unavailable,
            ViewState::Loading => ViewState::Loading,
            ViewState::Loaded(value) => ViewState::Loaded(f(value)),
            ViewState::Errored(message) => ViewState::Errored(message),
        }
    }
}

/// What a child view receives from its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependentInput<U> {
    /// Parent still loading; the child must not render or fetch yet.
    Pending,
    /// Parent finished without offering the link.
    Absent,
    Ready(U),
}

impl<U> DependentInput<U> {
    pub fn ready(&self) -> Option<&U> {
        match self {
            DependentInput::Ready(input) => Some(input),
            _ => None,
        }
    }
}

/// Owned by a mounted view; dropping it marks the view unmounted.
#[derive(Debug)]
pub struct MountGuard(Rc<Cell<bool>>);

/// Cheap handle async work checks before touching view state.
#[derive(Debug, Clone)]
pub struct Mounted(Rc<Cell<bool>>);

impl MountGuard {
    pub fn new() -> Self {
        MountGuard(Rc::new(Cell::new(true)))
    }

    pub fn handle(&self) -> Mounted {
        Mounted(self.0.clone())
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Mounted {
    pub fn is_mounted(&self) -> bool {
        self.0.get()
    }

    /// Hand `value` to `apply` only while the view is still mounted.
    pub fn deliver<T>(&self, value: T, apply: impl FnOnce(T)) -> bool {
        if self.is_mounted() {
            apply(value);
            true
        } else {
            log::debug!("View unmounted, discarding late result");
            false
        }
    }
}

/// Run the single fetch a view performs on mount.
///
/// Returns `None` when the view was unmounted before the response came
/// back, in which case the caller must leave its state alone.
pub async fn load<C, T>(client: &C, url: Option<&str>, mounted: &Mounted) -> Option<ViewState<T>>
where
    C: HttpClient + ?Sized,
    T: DeserializeOwned,
{
    let Some(url) = url else {
        return Some(ViewState::Unavailable);
    };
    let result = get_doc(client, url).await;
    if !mounted.is_mounted() {
        log::debug!("Dropping response from {url}: view unmounted");
        return None;
    }
    Some(ViewState::from_result(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieDoc;
    use crate::testing::ScriptedClient;
    use serde_json::json;

    #[test]
    fn test_initial_state() {
        assert_eq!(ViewState::<()>::for_input(Some("/movies")), ViewState::Loading);
        assert_eq!(ViewState::<()>::for_input(None), ViewState::Unavailable);
    }

    #[test]
    fn test_child_pending_until_loaded() {
        let loading: ViewState<Option<&str>> = ViewState::Loading;
        assert_eq!(loading.child(|v| *v), DependentInput::Pending);

        let loaded = ViewState::Loaded(Some("/reviews"));
        assert_eq!(loaded.child(|v| *v), DependentInput::Ready("/reviews"));

        let without_link: ViewState<Option<&str>> = ViewState::Loaded(None);
        assert_eq!(without_link.child(|v| *v), DependentInput::Absent);

        let failed: ViewState<Option<&str>> = ViewState::Errored("x".to_string());
        assert_eq!(failed.child(|v| *v), DependentInput::Absent);
    }

    #[test]
    fn test_guard_drop_unmounts() {
        let guard = MountGuard::new();
        let mounted = guard.handle();
        assert!(mounted.is_mounted());
        drop(guard);
        assert!(!mounted.is_mounted());

        let mut applied = false;
        assert!(!mounted.deliver(1, |_| applied = true));
        assert!(!applied);
    }

    #[tokio::test]
    async fn test_load_without_url_never_fetches() {
        let client = ScriptedClient::new();
        let guard = MountGuard::new();
        let state: Option<ViewState<MovieDoc>> = load(&client, None, &guard.handle()).await;
        assert_eq!(state, Some(ViewState::Unavailable));
        assert!(client.requested().is_empty());
    }

    #[tokio::test]
    async fn test_load_success_and_error() {
        let client = ScriptedClient::new()
            .respond("/api/movies/1/", json!({ "id": 1, "title": "Alien" }))
            .fail(
                "/api/movies/2/",
                FetchError::Protocol {
                    status: 404,
                    message: "Not found".to_string(),
                },
            );
        let guard = MountGuard::new();

        let ok: ViewState<MovieDoc> = load(&client, Some("/api/movies/1/"), &guard.handle())
            .await
            .unwrap();
        assert_eq!(ok.loaded().unwrap().body.title, "Alien");

        let err: ViewState<MovieDoc> = load(&client, Some("/api/movies/2/"), &guard.handle())
            .await
            .unwrap();
        assert_eq!(err, ViewState::Errored("Not found".to_string()));
        assert_eq!(client.requested(), vec!["/api/movies/1/", "/api/movies/2/"]);
    }

    #[tokio::test]
    async fn test_late_result_discarded() {
        let client = ScriptedClient::new().respond("/api/movies/1/", json!({ "id": 1, "title": "A" }));
        let guard = MountGuard::new();
        let mounted = guard.handle();
        drop(guard);

        let state: Option<ViewState<MovieDoc>> =
            load(&client, Some("/api/movies/1/"), &mounted).await;
        assert_eq!(state, None);
    }
}
