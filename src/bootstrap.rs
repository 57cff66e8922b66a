//! Bootstrap: discover the API's endpoints from its root document.
//!
//! The application renders nothing but a spinner until [`bootstrap`] has
//! produced a [`BootState`]. On success the complete [`Endpoints`] value is
//! available at once; on any failure the registry stays empty and the
//! shell shows a single full-page error.

use serde::Deserialize;

use crate::config::ClientConfig;
use crate::endpoints::Endpoints;
use crate::error::FetchError;
use crate::http::{HttpClient, get_doc};
use crate::mason::Controls;

/// Text of the full-page error shown when bootstrap fails.
pub const UNAVAILABLE_MESSAGE: &str = "The API is currently unavailable. Please try again later!";

/// The root document must carry a controls map; nothing else is read.
#[derive(Debug, Deserialize)]
struct RootDoc {
    #[serde(rename = "@controls")]
    controls: Controls,
}

/// Outcome of bootstrapping, as seen by the application shell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BootState {
    #[default]
    Loading,
    Ready(Endpoints),
    Failed,
}

impl BootState {
    /// Bootstrap has finished, successfully or not.
    pub fn loaded(&self) -> bool {
        !matches!(self, BootState::Loading)
    }

    pub fn success(&self) -> bool {
        matches!(self, BootState::Ready(_))
    }

    pub fn endpoints(&self) -> Option<&Endpoints> {
        match self {
            BootState::Ready(endpoints) => Some(endpoints),
            _ => None,
        }
    }
}

/// Fetch the root document and build the endpoint registry from it.
///
/// Each call starts from an empty registry, so resolving the same root
/// twice yields the same value.
pub async fn resolve<C>(client: &C, config: &ClientConfig) -> Result<Endpoints, FetchError>
where
    C: HttpClient + ?Sized,
{
    let root: RootDoc = get_doc(client, &config.root_url).await?;
    let endpoints = Endpoints::from_controls(&root.controls, &config.namespace);
    log::info!(
        "Discovered {} of {} endpoints from {}",
        endpoints.len(),
        crate::endpoints::Endpoint::ALL.len(),
        config.root_url
    );
    Ok(endpoints)
}

/// Run [`resolve`] and collapse every failure into [`BootState::Failed`].
pub async fn bootstrap<C>(client: &C, config: &ClientConfig) -> BootState
where
    C: HttpClient + ?Sized,
{
    match resolve(client, config).await {
        Ok(endpoints) => BootState::Ready(endpoints),
        Err(err) => {
            log::error!("Bootstrap from {} failed: {err}", config.root_url);
            BootState::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::Endpoint;
    use crate::testing::ScriptedClient;
    use serde_json::json;

    const ROOT: &str = "/api/";

    fn config() -> ClientConfig {
        ClientConfig::new(ROOT, "x")
    }

    #[tokio::test]
    async fn test_partial_root_document() {
        let client = ScriptedClient::new().respond(
            ROOT,
            json!({
                "@controls": {
                    "x:movies-all": { "href": "/movies" },
                    "x:login": { "href": "/login" }
                }
            }),
        );

        let state = bootstrap(&client, &config()).await;
        assert!(state.loaded());
        assert!(state.success());

        let endpoints = state.endpoints().unwrap();
        assert_eq!(endpoints.get(Endpoint::MoviesAll), Some("/movies"));
        assert_eq!(endpoints.get(Endpoint::Login), Some("/login"));
        for endpoint in [
            Endpoint::UsersAll,
            Endpoint::CategoriesAll,
            Endpoint::AddMovie,
            Endpoint::AddUser,
            Endpoint::AddCategory,
            Endpoint::CurrentUser,
        ] {
            assert_eq!(endpoints.get(endpoint), None);
        }
        assert_eq!(client.requested(), vec![ROOT]);
    }

    #[tokio::test]
    async fn test_every_subset_of_controls_succeeds() {
        let ns = config().namespace;
        for mask in 0u32..(1 << Endpoint::ALL.len()) {
            let mut controls = serde_json::Map::new();
            for (bit, endpoint) in Endpoint::ALL.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    controls.insert(
                        ns.key(endpoint.control()),
                        json!({ "href": format!("/{bit}") }),
                    );
                }
            }
            let client = ScriptedClient::new().respond(ROOT, json!({ "@controls": controls }));

            let state = bootstrap(&client, &config()).await;
            let endpoints = state.endpoints().unwrap();
            for (bit, endpoint) in Endpoint::ALL.iter().enumerate() {
                let expected = format!("/{bit}");
                if mask & (1 << bit) != 0 {
                    assert_eq!(endpoints.get(*endpoint), Some(expected.as_str()));
                } else {
                    assert_eq!(endpoints.get(*endpoint), None);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let client =
            ScriptedClient::new().fail(ROOT, FetchError::transport(ROOT, "connection refused"));
        let state = bootstrap(&client, &config()).await;
        assert!(state.loaded());
        assert!(!state.success());
        assert_eq!(state.endpoints(), None);
    }

    #[tokio::test]
    async fn test_protocol_failure() {
        let client = ScriptedClient::new().fail(
            ROOT,
            FetchError::Protocol {
                status: 504,
                message: "Gateway Timeout".to_string(),
            },
        );
        assert_eq!(bootstrap(&client, &config()).await, BootState::Failed);
    }

    #[tokio::test]
    async fn test_missing_controls_map_fails() {
        let client = ScriptedClient::new().respond(ROOT, json!({ "title": "no controls" }));
        assert_eq!(bootstrap(&client, &config()).await, BootState::Failed);

        let client = ScriptedClient::new().respond(ROOT, json!("just a string"));
        assert_eq!(bootstrap(&client, &config()).await, BootState::Failed);
    }

    #[tokio::test]
    async fn test_resolve_twice_is_idempotent() {
        let client = ScriptedClient::new().respond(
            ROOT,
            json!({
                "@controls": {
                    "x:movies-all": { "href": "/movies" },
                    "x:current-user": { "href": "/me" }
                }
            }),
        );

        let first = resolve(&client, &config()).await.unwrap();
        let second = resolve(&client, &config()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_boot_state_flags() {
        assert!(!BootState::Loading.loaded());
        assert!(!BootState::Loading.success());
        assert!(BootState::Failed.loaded());
        assert!(BootState::Ready(Endpoints::new()).success());
    }
}
