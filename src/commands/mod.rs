//! Remote API Bindings
//!
//! Client for the search and journeys HTTP endpoints, organized by domain.
//! Everything above this layer talks to the [`JourneyApi`] trait so the
//! persistence fallbacks can be exercised without a network.

mod journey;
mod search;

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;
use thiserror::Error;

use crate::models::Journey;

pub use search::{hits_from_response, search_activities};

/// Characters left alone by `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Percent-encode one URL component
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Remote operations used by the pages
#[async_trait(?Send)]
pub trait JourneyApi {
    /// `GET /search?query=...`
    async fn search(&self, query: &str) -> ApiResult<Vec<Value>>;
    /// `GET /journeys/{id}`
    async fn fetch_journey(&self, id: &str) -> ApiResult<Value>;
    /// `PUT /journeys/{id}`
    async fn update_journey(&self, id: &str, payload: &Journey) -> ApiResult<Value>;
    /// `POST /journeys/save`
    async fn save_journey(&self, payload: &Journey) -> ApiResult<Value>;
    /// `POST /journeys`
    async fn create_journey(&self, payload: &Journey) -> ApiResult<Value>;
}

/// `gloo-net` implementation against the site's API
#[derive(Debug, Clone, Default)]
pub struct HttpApi {
    base: String,
}

impl HttpApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Check the status, then decode the JSON body
async fn json_body(resp: Response) -> ApiResult<Value> {
    if !resp.ok() {
        return Err(ApiError::Status(resp.status()));
    }
    resp.json::<Value>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

#[async_trait(?Send)]
impl JourneyApi for HttpApi {
    async fn search(&self, query: &str) -> ApiResult<Vec<Value>> {
        let url = self.url(&format!("/search?query={}", encode_component(query)));
        let resp = Request::get(&url).send().await.map_err(network)?;
        match json_body(resp).await? {
            Value::Array(items) => Ok(items),
            other => Err(ApiError::Decode(format!("expected an array, got {}", kind(&other)))),
        }
    }

    async fn fetch_journey(&self, id: &str) -> ApiResult<Value> {
        let url = self.url(&journey::item_path(id));
        let resp = Request::get(&url).send().await.map_err(network)?;
        json_body(resp).await
    }

    async fn update_journey(&self, id: &str, payload: &Journey) -> ApiResult<Value> {
        let url = self.url(&journey::item_path(id));
        let resp = Request::put(&url)
            .json(payload)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        json_body(resp).await
    }

    async fn save_journey(&self, payload: &Journey) -> ApiResult<Value> {
        let url = self.url(journey::SAVE_PATH);
        let resp = Request::post(&url)
            .json(payload)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        json_body(resp).await
    }

    async fn create_journey(&self, payload: &Journey) -> ApiResult<Value> {
        let url = self.url(journey::COLLECTION_PATH);
        let resp = Request::post(&url)
            .json(payload)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        json_body(resp).await
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_component_matches_encode_uri_component() {
        assert_eq!(encode_component("musée d'art"), "mus%C3%A9e%20d'art");
        assert_eq!(encode_component("a&b=c/d?"), "a%26b%3Dc%2Fd%3F");
        assert_eq!(encode_component("x-y_z.(1)!~*"), "x-y_z.(1)!~*");
    }

    #[test]
    fn test_url_prefixes_base() {
        let api = HttpApi::new("https://api.example.com");
        assert_eq!(api.url("/journeys"), "https://api.example.com/journeys");
        assert_eq!(HttpApi::default().url("/search"), "/search");
    }
}
