//! Blocking client for the Metron comic metadata API.
//!
//! # Overview
//! [`MetronClient`] exposes one typed accessor per resource (creators,
//! characters, series, issues, reading lists, a user's collection, ...).
//! Every accessor goes through a [`RequestPipeline`] that builds the URL,
//! consults an optional [`CacheStore`], sends the request over a
//! [`Transport`], and turns the reply into JSON or an [`ApiError`].
//!
//! # Design
//! - The pipeline works on plain [`HttpRequest`] / [`HttpResponse`] values;
//!   the transport is the only piece that does network IO, so tests swap it
//!   for a scripted one.
//! - List endpoints are followed to the last page and returned whole.
//! - Successful GET responses are cached raw under a key built from the URL
//!   and the sorted query; writes are never cached.
//! - [`SqliteCache`] is the persistent cache, with optional day-based expiry.

pub mod cache;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use cache::{CacheStore, MemoryCache, SqliteCache};
pub use client::MetronClient;
pub use config::ClientConfig;
pub use endpoint::{cache_key, Endpoint, ParamValue, QueryParams};
pub use error::{ApiError, CacheError, Error, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use pipeline::RequestPipeline;
pub use transport::{
    RateLimit, RateLimited, Transport, TransportError, UreqTransport, DEFAULT_BODY_LIMIT,
};
