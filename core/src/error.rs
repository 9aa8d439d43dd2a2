//! Error types for the Metron API client.
//!
//! # Design
//! Three kinds reach the caller. `Authentication` is raised while building a
//! `ClientConfig` and never after. `Api` covers everything the remote side or
//! its data can go wrong with: a `detail` body, a bare non-2xx status, a
//! transport failure, or a response that does not fit the target type.
//! `Cache` is kept apart because it points at the caller's cache
//! configuration rather than at the service.

use crate::transport::TransportError;

/// Top-level error returned by every client operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Credentials were missing when the client was configured.
    #[error("authentication error: {0}")]
    Authentication(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Failures attributed to the remote service or the data it returned.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service answered with a body containing `detail`. This is checked
    /// before the status code since some failures come back as HTTP 200.
    #[error("{detail}")]
    Detail { status: u16, detail: String },

    /// A non-2xx status without a `detail` body.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response.
    #[error("connection error for {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: TransportError,
    },

    /// The JSON did not match the expected resource shape.
    #[error("invalid {resource} response: {source}")]
    Validation {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The body was not JSON, or a list envelope was malformed.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Failures of the configured response cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The cache does not provide the named operation.
    #[error("cache object does not support `{0}`")]
    Unsupported(&'static str),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A cached row held text that is not valid JSON.
    #[error("cached value is not valid json: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_error_displays_message_only() {
        let err = Error::from(ApiError::Detail {
            status: 404,
            detail: "Not found.".to_string(),
        });
        assert_eq!(err.to_string(), "Not found.");
    }

    #[test]
    fn connection_error_keeps_source() {
        let err = ApiError::Connection {
            url: "https://metron.cloud/api/issue/1/".to_string(),
            source: TransportError::Timeout,
        };
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("request timed out"));
        assert!(err.to_string().contains("issue/1"));
    }

    #[test]
    fn unsupported_cache_operation_displays() {
        let err = Error::from(CacheError::Unsupported("store"));
        assert_eq!(err.to_string(), "cache object does not support `store`");
        assert!(matches!(err, Error::Cache(_)));
    }

    #[test]
    fn sqlite_error_displays_context() {
        let inner = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some("table not found".into()),
        );
        let msg = CacheError::Sqlite(inner).to_string();
        assert!(msg.contains("sqlite"), "got: {msg}");
    }
}
