//! Request pipeline: cache lookup, network fetch, error classification,
//! pagination.
//!
//! # Design
//! Every read goes through [`RequestPipeline::fetch_single`] or
//! [`RequestPipeline::fetch_paginated`]. Both follow the same sequence for
//! each URL they touch: look the cache key up, fetch on a miss, classify the
//! response, store the raw JSON. Classification looks for a `detail` body
//! first and only then at the status code, because the service reports some
//! failures with HTTP 200.
//!
//! Writes ([`RequestPipeline::send`]) skip the cache entirely.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::config::ClientConfig;
use crate::endpoint::{cache_key, Endpoint, QueryParams};
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Mediates every call between the resource accessors and the network.
pub struct RequestPipeline {
    config: Arc<ClientConfig>,
    transport: Box<dyn Transport>,
    cache: Option<Box<dyn CacheStore>>,
}

impl RequestPipeline {
    pub fn new(config: Arc<ClientConfig>, transport: Box<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: Box<dyn CacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// GET one resource or one page, through the cache.
    pub fn fetch_single(&self, endpoint: &Endpoint, params: &QueryParams) -> Result<Value> {
        let url = self.config.api_url(endpoint);
        let key = cache_key(&url, params);
        self.cached_get(&url, params.to_pairs(), &key)
    }

    /// GET a list endpoint and follow every `next` link, returning one
    /// envelope whose `results` hold all pages in order and whose `next` is
    /// null.
    pub fn fetch_paginated(&self, endpoint: &Endpoint, params: &QueryParams) -> Result<Value> {
        let first = self.fetch_single(endpoint, params)?;
        let mut envelope = into_envelope(first)?;
        let mut next = next_url(&envelope);

        let mut results = match envelope.remove("results") {
            Some(Value::Array(results)) => results,
            _ => {
                return Err(
                    ApiError::InvalidResponse("list response has no results array".into()).into(),
                )
            }
        };

        let mut visited = HashSet::new();
        while let Some(url) = next {
            if !visited.insert(url.clone()) {
                return Err(ApiError::InvalidResponse(format!(
                    "pagination revisits {url}"
                ))
                .into());
            }
            debug!(url = %url, fetched = results.len(), "following next page");
            let page = into_envelope(self.cached_get(&url, Vec::new(), &url)?)?;
            next = next_url(&page);
            match page.get("results") {
                Some(Value::Array(items)) => results.extend(items.iter().cloned()),
                _ => {
                    return Err(ApiError::InvalidResponse(format!(
                        "page {url} has no results array"
                    ))
                    .into())
                }
            }
        }

        envelope.insert("results".to_string(), Value::Array(results));
        envelope.insert("next".to_string(), Value::Null);
        Ok(Value::Object(envelope))
    }

    /// POST or PATCH `body` as JSON. Never cached.
    pub fn send<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        endpoint: &Endpoint,
        body: &B,
    ) -> Result<Value> {
        let body = serde_json::to_string(body).map_err(ApiError::Serialization)?;
        let url = self.config.api_url(endpoint);
        self.request(method, &url, Vec::new(), Some(body))
    }

    fn cached_get(&self, url: &str, query: Vec<(String, String)>, key: &str) -> Result<Value> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(key)? {
                debug!(key, "cache hit");
                return Ok(hit);
            }
            debug!(key, "cache miss");
        }

        let data = self.request(HttpMethod::Get, url, query, None)?;

        if let Some(cache) = &self.cache {
            cache.store(key, &data)?;
        }
        Ok(data)
    }

    fn request(
        &self,
        method: HttpMethod,
        url: &str,
        query: Vec<(String, String)>,
        body: Option<String>,
    ) -> Result<Value> {
        let mut headers = vec![
            ("User-Agent".to_string(), self.config.user_agent()),
            ("Authorization".to_string(), self.config.authorization()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        let request = HttpRequest {
            method,
            url: url.to_string(),
            query,
            headers,
            body,
        };

        debug!(%method, url, "sending request");
        let response = self
            .transport
            .execute(&request)
            .map_err(|source| ApiError::Connection {
                url: url.to_string(),
                source,
            })?;

        classify(response).map_err(|err| {
            warn!(%method, url, error = %err, "request failed");
            err.into()
        })
    }
}

/// Turn a response into JSON or the matching `ApiError`.
fn classify(response: HttpResponse) -> std::result::Result<Value, ApiError> {
    let parsed: Option<Value> = if response.body.trim().is_empty() {
        None
    } else {
        serde_json::from_str(&response.body).ok()
    };

    if let Some(detail) = parsed.as_ref().and_then(|v| v.get("detail")) {
        let detail = match detail {
            Value::String(message) => message.clone(),
            other => other.to_string(),
        };
        return Err(ApiError::Detail {
            status: response.status,
            detail,
        });
    }

    if !response.is_success() {
        return Err(ApiError::Http {
            status: response.status,
            body: response.body,
        });
    }

    match parsed {
        Some(value) => Ok(value),
        None if response.body.trim().is_empty() => Ok(Value::Null),
        None => Err(ApiError::InvalidResponse(format!(
            "body is not json: {}",
            truncate(&response.body, 120)
        ))),
    }
}

fn into_envelope(value: Value) -> std::result::Result<Map<String, Value>, ApiError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::InvalidResponse(format!(
            "expected a list envelope, got {other}"
        ))),
    }
}

fn next_url(envelope: &Map<String, Value>) -> Option<String> {
    envelope
        .get("next")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
