//! Client configuration.
//!
//! # Design
//! `ClientConfig` is built once, validated at construction, and then shared
//! read-only (behind an `Arc`) by the pipeline. Nothing in it changes after
//! the client exists.

use std::fmt;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};

/// Production service.
pub const DEFAULT_BASE_URL: &str = "https://metron.cloud";

/// Local development server, used by [`ClientConfig::dev_mode`].
pub const DEV_BASE_URL: &str = "http://127.0.0.1:8000";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Immutable settings shared by every request.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    username: String,
    password: String,
    app_agent: Option<String>,
    timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("app_agent", &self.app_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Validate credentials and build a configuration for the production
    /// service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] when either credential is missing
    /// or empty.
    pub fn new(username: Option<&str>, password: Option<&str>) -> Result<Self> {
        let username = username
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::Authentication("Missing username.".to_string()))?;
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::Authentication("Missing passwd.".to_string()))?;
        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            app_agent: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Build a configuration from `METRON_*` environment variables.
    ///
    /// `METRON_USERNAME` and `METRON_PASSWORD` are required.
    /// `METRON_USER_AGENT`, `METRON_BASE_URL`, `METRON_DEV_MODE` and
    /// `METRON_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        let username = std::env::var("METRON_USERNAME").ok();
        let password = std::env::var("METRON_PASSWORD").ok();
        let mut config = Self::new(username.as_deref(), password.as_deref())?;

        if let Ok(agent) = std::env::var("METRON_USER_AGENT") {
            config = config.with_user_agent(&agent);
        }
        let dev = std::env::var("METRON_DEV_MODE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
            .unwrap_or(false);
        if dev {
            config = config.dev_mode();
        }
        if let Ok(base_url) = std::env::var("METRON_BASE_URL") {
            config = config.with_base_url(&base_url);
        }
        if let Some(secs) = std::env::var("METRON_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Prefix the library's user agent with an application identifier.
    pub fn with_user_agent(mut self, agent: &str) -> Self {
        self.app_agent = Some(agent.to_string());
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Point the client at a local server instead of metron.cloud.
    pub fn dev_mode(self) -> Self {
        self.with_base_url(DEV_BASE_URL)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full request URL for `endpoint`. The service expects a trailing slash.
    pub fn api_url(&self, endpoint: &Endpoint) -> String {
        format!("{}/api/{}/", self.base_url, endpoint.path())
    }

    /// `User-Agent` header value.
    pub fn user_agent(&self) -> String {
        let prefix = self
            .app_agent
            .as_deref()
            .map(|agent| format!("{agent} "))
            .unwrap_or_default();
        format!(
            "{prefix}metron-core/{} ({}; {})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH
        )
    }

    /// `Authorization` header value for HTTP basic auth.
    pub fn authorization(&self) -> String {
        let credentials = format!("{}:{}", self.username, self.password);
        format!("Basic {}", STANDARD.encode(credentials))
    }
}
