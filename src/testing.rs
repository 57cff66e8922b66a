//! Scripted in-memory client shared by the unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use crate::error::FetchError;
use crate::http::HttpClient;

/// Answers requests from a fixed script and records every call.
#[derive(Default)]
pub(crate) struct ScriptedClient {
    responses: HashMap<String, Result<Value, FetchError>>,
    calls: RefCell<Vec<(String, String)>>,
    posted: RefCell<Vec<Value>>,
}

impl ScriptedClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), Ok(body));
        self
    }

    pub(crate) fn fail(mut self, url: &str, err: FetchError) -> Self {
        self.responses.insert(url.to_string(), Err(err));
        self
    }

    /// URLs requested so far, in order.
    pub(crate) fn requested(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(_, url)| url.clone()).collect()
    }

    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }

    pub(crate) fn posted(&self) -> Vec<Value> {
        self.posted.borrow().clone()
    }

    fn answer(&self, method: &str, url: &str) -> Result<Value, FetchError> {
        self.calls
            .borrow_mut()
            .push((method.to_string(), url.to_string()));
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::transport(url, "no scripted response")))
    }
}

impl HttpClient for ScriptedClient {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.answer("GET", url)
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, FetchError> {
        self.posted.borrow_mut().push(body.clone());
        self.answer("POST", url)
    }
}
