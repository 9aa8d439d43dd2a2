//! Transports that execute an `HttpRequest` against the network.
//!
//! # Design
//! The pipeline never touches sockets. It builds an `HttpRequest`, calls
//! [`Transport::execute`], and interprets the returned `HttpResponse`. Only a
//! request that produced no response at all is a `TransportError`; every
//! status code, including 4xx/5xx, comes back as data.
//!
//! Outbound rate limiting is a decorator around any transport
//! ([`RateLimited`]) rather than a pipeline concern.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::warn;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// A request that did not produce an HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    /// Headers arrived but the body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Executes one HTTP round-trip.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Largest response body `UreqTransport` reads by default. Full issue lists
/// can exceed ureq's own 10 MB default.
pub const DEFAULT_BODY_LIMIT: u64 = 64 * 1024 * 1024;

/// Blocking transport backed by a `ureq` agent.
pub struct UreqTransport {
    agent: ureq::Agent,
    body_limit: u64,
}

impl UreqTransport {
    /// Build an agent that returns 4xx/5xx responses as data and gives up on
    /// a request after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self {
            agent,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Cap on bytes read from one response body.
    pub fn with_body_limit(mut self, bytes: u64) -> Self {
        self.body_limit = bytes;
        self
    }
}

fn apply<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &HttpRequest,
) -> ureq::RequestBuilder<B> {
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    for (key, value) in &request.headers {
        builder = builder.header(key, value);
    }
    builder
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        other => TransportError::Connection(other.to_string()),
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => apply(self.agent.get(url), request).call(),
            (HttpMethod::Post, Some(body)) => {
                apply(self.agent.post(url), request).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => apply(self.agent.post(url), request).send_empty(),
            (HttpMethod::Patch, Some(body)) => {
                apply(self.agent.patch(url), request).send(body.as_bytes())
            }
            (HttpMethod::Patch, None) => apply(self.agent.patch(url), request).send_empty(),
        };
        let mut response = result.map_err(map_ureq_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(self.body_limit)
            .read_to_string()
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// A call budget: at most `calls` requests in any rolling `period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub calls: usize,
    pub period: Duration,
}

impl RateLimit {
    pub const fn new(calls: usize, period: Duration) -> Self {
        Self { calls, period }
    }

    pub const fn per_minute(calls: usize) -> Self {
        Self::new(calls, Duration::from_secs(60))
    }

    pub const fn per_day(calls: usize) -> Self {
        Self::new(calls, Duration::from_secs(24 * 60 * 60))
    }
}

/// Budgets published by metron.cloud.
pub const METRON_RATE_LIMITS: [RateLimit; 2] =
    [RateLimit::per_minute(30), RateLimit::per_day(10_000)];

/// Decorator that blocks a call until every budget has room for it.
pub struct RateLimited<T> {
    inner: T,
    limits: Vec<RateLimit>,
    windows: Mutex<Vec<VecDeque<Instant>>>,
}

impl<T: Transport> RateLimited<T> {
    pub fn new(inner: T, limits: &[RateLimit]) -> Self {
        let limits: Vec<RateLimit> = limits
            .iter()
            .map(|l| RateLimit::new(l.calls.max(1), l.period))
            .collect();
        let windows = Mutex::new(vec![VecDeque::new(); limits.len()]);
        Self {
            inner,
            limits,
            windows,
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Block until a call fits into every window, then record it.
    fn acquire(&self) {
        loop {
            let wait = {
                let mut windows = self.windows.lock();
                let now = Instant::now();
                let mut wait = Duration::ZERO;
                for (limit, calls) in self.limits.iter().zip(windows.iter_mut()) {
                    while calls
                        .front()
                        .is_some_and(|t| now.duration_since(*t) >= limit.period)
                    {
                        calls.pop_front();
                    }
                    if calls.len() >= limit.calls {
                        if let Some(oldest) = calls.front() {
                            wait = wait.max(limit.period - now.duration_since(*oldest));
                        }
                    }
                }
                if wait.is_zero() {
                    for calls in windows.iter_mut() {
                        calls.push_back(now);
                    }
                    return;
                }
                wait
            };
            warn!(wait_ms = wait.as_millis() as u64, "rate limit reached, waiting");
            std::thread::sleep(wait);
        }
    }
}

impl<T: Transport> Transport for RateLimited<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.acquire();
        self.inner.execute(request)
    }
}
