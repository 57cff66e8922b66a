//! HTTP seam between the views and the network.
//!
//! Views never talk to a transport directly; they go through an
//! [`HttpClient`]. The browser crate implements it on top of `gloo::net`,
//! the command line tool on top of `reqwest` (feature `cli`), and tests use
//! an in-memory script.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::FetchError;
use crate::mason::error_message;

/// Asynchronous JSON transport.
///
/// Implementations run on a single-threaded executor, so futures are not
/// required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait HttpClient {
    /// GET `url` and return the decoded JSON body of a 2xx response.
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;

    /// POST `body` as JSON to `url` and return the decoded response body.
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, FetchError>;
}

/// Fetch `url` and decode it as `T`.
pub async fn get_doc<C, T>(client: &C, url: &str) -> Result<T, FetchError>
where
    C: HttpClient + ?Sized,
    T: DeserializeOwned,
{
    log::debug!("GET {url}");
    let body = client.get_json(url).await?;
    serde_json::from_value(body).map_err(|err| {
        log::warn!("Response from {url} did not decode: {err}");
        FetchError::from(err)
    })
}

/// Post `payload` to `url` and return the raw response body.
pub async fn post_doc<C, P>(client: &C, url: &str, payload: &P) -> Result<Value, FetchError>
where
    C: HttpClient + ?Sized,
    P: Serialize,
{
    log::debug!("POST {url}");
    let body = serde_json::to_value(payload)?;
    client.post_json(url, &body).await
}

/// Turn a status code and raw body into the JSON result every client returns.
///
/// Non-2xx statuses become [`FetchError::Protocol`] with whatever message
/// the error body carried. An empty 2xx body decodes to `Value::Null`.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<Value, FetchError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| error_message(&value))
            .unwrap_or_default();
        return Err(FetchError::Protocol { status, message });
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(body)?)
}

#[cfg(feature = "cli")]
pub use native::ReqwestClient;

#[cfg(feature = "cli")]
mod native {
    use reqwest::Client;
    use serde_json::Value;
    use url::Url;

    use super::{HttpClient, interpret_response};
    use crate::error::FetchError;

    /// `reqwest` transport resolving hrefs against the API root.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: Client,
        base: Url,
    }

    impl ReqwestClient {
        pub fn new(base: Url) -> Self {
            Self {
                client: Client::new(),
                base,
            }
        }

        /// Absolute URL for an href that may be relative to the API root.
        pub fn resolve(&self, href: &str) -> Result<Url, FetchError> {
            self.base
                .join(href)
                .map_err(|err| FetchError::transport(href, err))
        }

        async fn finish(&self, url: &Url, res: reqwest::Response) -> Result<Value, FetchError> {
            let status = res.status().as_u16();
            let bytes = match res.bytes().await {
                Ok(result) => result,
                Err(err) => {
                    log::error!("Failed to read body from {url}: {err:?}");
                    return Err(FetchError::transport(url.as_str(), err));
                }
            };
            interpret_response(status, &bytes)
        }
    }

    impl HttpClient for ReqwestClient {
        async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
            let url = self.resolve(url)?;
            let res = match self.client.get(url.clone()).send().await {
                Ok(result) => result,
                Err(err) => {
                    log::error!("GET {url} failed: {err:?}");
                    return Err(FetchError::transport(url.as_str(), err));
                }
            };
            self.finish(&url, res).await
        }

        async fn post_json(&self, url: &str, body: &Value) -> Result<Value, FetchError> {
            let url = self.resolve(url)?;
            let res = match self.client.post(url.clone()).json(body).send().await {
                Ok(result) => result,
                Err(err) => {
                    log::error!("POST {url} failed: {err:?}");
                    return Err(FetchError::transport(url.as_str(), err));
                }
            };
            self.finish(&url, res).await
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interpret_success() {
        let body = interpret_response(200, br#"{"title":"Alien"}"#).unwrap();
        assert_eq!(body, json!({ "title": "Alien" }));
    }

    #[test]
    fn test_interpret_empty_body() {
        assert_eq!(interpret_response(204, b"").unwrap(), Value::Null);
        assert_eq!(interpret_response(201, b"  \n").unwrap(), Value::Null);
    }

    #[test]
    fn test_interpret_error_with_message() {
        let err = interpret_response(403, br#"{"message":"Forbidden"}"#).unwrap_err();
        assert_eq!(
            err,
            FetchError::Protocol {
                status: 403,
                message: "Forbidden".to_string()
            }
        );
    }

    #[test]
    fn test_interpret_error_without_json() {
        let err = interpret_response(500, b"<h1>boom</h1>").unwrap_err();
        assert_eq!(
            err,
            FetchError::Protocol {
                status: 500,
                message: String::new()
            }
        );
    }

    #[test]
    fn test_interpret_malformed() {
        let err = interpret_response(200, b"{not json").unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }
}
