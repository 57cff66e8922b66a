//! Browser transport on top of `gloo::net`.

use gloo::net::http::{Request, Response};
use moviereview_client::{FetchError, HttpClient, interpret_response};
use serde_json::Value;

const MASON_JSON: &str = "application/vnd.mason+json, application/json";

/// Fetch-based client. Relative hrefs resolve against the page origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlooClient;

async fn finish(url: &str, res: Response) -> Result<Value, FetchError> {
    let status = res.status();
    let body = res
        .binary()
        .await
        .map_err(|e| FetchError::transport(url, e))?;
    interpret_response(status, &body)
}

impl HttpClient for GlooClient {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let res = Request::get(url)
            .header("Accept", MASON_JSON)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;
        finish(url, res).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, FetchError> {
        let request = Request::post(url)
            .header("Accept", MASON_JSON)
            .json(body)
            .map_err(FetchError::malformed)?;
        let res = request
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;
        finish(url, res).await
    }
}
