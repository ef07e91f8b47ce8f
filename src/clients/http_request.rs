//! HTTP request types for the Reverb API SDK.
//!
//! This module provides [`HttpMethod`] and [`HttpRequestConfig`], the
//! per-request options handed to an [`HttpClient`](crate::clients::HttpClient).

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::config::HeaderSet;

/// HTTP methods supported by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
    /// HTTP PATCH method for partially updating resources.
    Patch,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `extra` key limiting how many redirects the reqwest transport follows.
///
/// `0` disables redirects, so a 3xx answer is reported as an [`HttpError`](crate::clients::HttpError).
pub const MAX_REDIRECTS: &str = "maxRedirects";

/// Per-request configuration passed to the transport.
///
/// `headers`, `params` and `timeout` are understood by every transport.
/// `extra` is an open-ended map for passthrough options a particular
/// transport may honour; transports ignore keys they do not know.
/// [`ReqwestHttpClient`](crate::clients::ReqwestHttpClient) honours only
/// [`MAX_REDIRECTS`]. The mock transport records `extra` without acting on it.
///
/// Query `params` with a `null` value are omitted when the URL is built.
///
/// # Example
///
/// ```rust
/// use reverb_api::clients::HttpRequestConfig;
/// use std::time::Duration;
///
/// let config = HttpRequestConfig::new()
///     .header("X-Request-Source", "docs")
///     .param("page", 2)
///     .param("query", "gibson")
///     .timeout(Duration::from_secs(10));
///
/// assert_eq!(config.params.len(), 2);
/// assert_eq!(config.timeout, Some(Duration::from_secs(10)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HttpRequestConfig {
    /// Request headers.
    pub headers: BTreeMap<String, String>,
    /// Query parameters.
    pub params: BTreeMap<String, serde_json::Value>,
    /// Request timeout.
    pub timeout: Option<Duration>,
    /// Additional transport-specific options.
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl HttpRequestConfig {
    /// Creates an empty request configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a request configuration carrying the given header set.
    #[must_use]
    pub fn with_headers(headers: &HeaderSet) -> Self {
        Self {
            headers: headers.to_map(),
            ..Self::default()
        }
    }

    /// Adds a single header, replacing any previous value.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Adds a query parameter only when `value` is `Some`.
    #[must_use]
    pub fn param_opt<V: Into<serde_json::Value>>(
        self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a passthrough option.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Limits how many redirects the reqwest transport follows.
    #[must_use]
    pub fn max_redirects(self, limit: u32) -> Self {
        self.extra(MAX_REDIRECTS, limit)
    }

    /// Overlays `other` on top of this configuration.
    ///
    /// Headers, params and extras from `other` replace entries with the same
    /// key; `other.timeout` replaces the timeout when set.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.headers.extend(other.headers);
        self.params.extend(other.params);
        self.extra.extend(other.extra);
        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }
        self
    }
}
