//! HTTP response types for the Reverb API SDK.
//!
//! [`HttpResponse`] is the envelope every transport returns: the decoded body
//! together with the status, headers and the request configuration that
//! produced it.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::HttpRequestConfig;

/// An HTTP response envelope.
///
/// The body type defaults to untyped JSON; endpoint wrappers convert it to a
/// typed body with [`HttpResponse::json`].
///
/// Header names are stored lower-cased.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse<T = serde_json::Value> {
    /// The response body.
    pub data: T,
    /// The HTTP status code.
    pub status: u16,
    /// The canonical reason phrase for the status code.
    pub status_text: String,
    /// Response headers, keyed by lower-cased name.
    pub headers: HashMap<String, String>,
    /// The configuration the request was sent with.
    pub config: HttpRequestConfig,
}

impl<T> HttpResponse<T> {
    /// Creates a response with no headers and an empty request config.
    #[must_use]
    pub fn new(status: u16, status_text: impl Into<String>, data: T) -> Self {
        Self {
            data,
            status,
            status_text: status_text.into(),
            headers: HashMap::new(),
            config: HttpRequestConfig::default(),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Replaces the body, keeping status, headers and config.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> HttpResponse<U> {
        HttpResponse {
            data: f(self.data),
            status: self.status,
            status_text: self.status_text,
            headers: self.headers,
            config: self.config,
        }
    }
}

impl HttpResponse {
    /// Deserializes the JSON body into `U`.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body does not match `U`.
    pub fn json<U: DeserializeOwned>(self) -> Result<HttpResponse<U>, serde_json::Error> {
        let data = serde_json::from_value(self.data)?;
        Ok(HttpResponse {
            data,
            status: self.status,
            status_text: self.status_text,
            headers: self.headers,
            config: self.config,
        })
    }
}
