//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Reverb API key.
///
/// This newtype ensures the API key is non-empty. The key is a bearer
/// credential, so the `Debug` implementation masks its value to prevent
/// accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use reverb_api::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }

    /// Returns the `Authorization` header value for this key.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated, domain-rooted base endpoint URL.
///
/// The endpoint must carry an `http` or `https` scheme followed by a host
/// that is either a dotted domain (`api.reverb.com`, `127.0.0.1`) or
/// `localhost`. A trailing slash is removed so paths can be joined with
/// exactly one separator.
///
/// # Example
///
/// ```rust
/// use reverb_api::BaseEndpoint;
///
/// let endpoint = BaseEndpoint::new("https://api.reverb.com/api/").unwrap();
/// assert_eq!(endpoint.as_ref(), "https://api.reverb.com/api");
/// assert_eq!(endpoint.scheme(), "https");
/// assert_eq!(endpoint.host_name(), "api.reverb.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseEndpoint {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseEndpoint {
    /// The marketplace's public API root.
    pub const DEFAULT: &'static str = "https://api.reverb.com/api";

    /// Creates a new validated base endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseEndpoint`] if the URL has no
    /// `http`/`https` scheme or its host is not domain-shaped.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidBaseEndpoint { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        let host = &url[host_start..host_end];
        if !Self::is_domain_rooted(host) {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    fn is_domain_rooted(host: &str) -> bool {
        if host.eq_ignore_ascii_case("localhost") {
            return true;
        }

        let labels: Vec<&str> = host.split('.').collect();
        labels.len() >= 2
            && labels.iter().all(|label| {
                !label.is_empty()
                    && label
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-')
            })
    }
}

impl Default for BaseEndpoint {
    fn default() -> Self {
        let host_start = "https://".len();
        Self {
            url: Self::DEFAULT.to_string(),
            scheme_end: "https".len(),
            host_start,
            host_end: host_start + "api.reverb.com".len(),
        }
    }
}

impl AsRef<str> for BaseEndpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for BaseEndpoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for BaseEndpoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
