//! The transport abstraction and its reqwest implementation.
//!
//! [`HttpClient`] is the injected capability every endpoint wrapper talks
//! to. [`ReqwestHttpClient`] is the production implementation; the
//! [`MockHttpClient`](crate::clients::MockHttpClient) test double implements
//! the same trait.

use std::borrow::Cow;
use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::redirect::Policy;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequestConfig, MAX_REDIRECTS};
use crate::clients::http_response::HttpResponse;
use crate::rest::build_url_with_query;

/// Verb-based HTTP transport.
///
/// Implementors only have to provide [`HttpClient::request`]; the verb
/// methods forward to it. A non-2xx status must be reported as an
/// [`HttpError`] carrying the response envelope.
///
/// # Example
///
/// ```rust,ignore
/// use reverb_api::clients::{HttpClient, HttpRequestConfig, ReqwestHttpClient};
///
/// let http = ReqwestHttpClient::new()?;
/// let response = http
///     .get("https://api.reverb.com/api/", HttpRequestConfig::new())
///     .await?;
/// println!("{}", response.data);
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a request and returns the response envelope.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for network failures and non-2xx responses.
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<serde_json::Value>,
        config: HttpRequestConfig,
    ) -> Result<HttpResponse, HttpError>;

    /// Performs an HTTP GET request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    async fn get(&self, url: &str, config: HttpRequestConfig) -> Result<HttpResponse, HttpError> {
        self.request(HttpMethod::Get, url, None, config).await
    }

    /// Performs an HTTP POST request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    async fn post(
        &self,
        url: &str,
        body: Option<serde_json::Value>,
        config: HttpRequestConfig,
    ) -> Result<HttpResponse, HttpError> {
        self.request(HttpMethod::Post, url, body, config).await
    }

    /// Performs an HTTP PUT request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    async fn put(
        &self,
        url: &str,
        body: Option<serde_json::Value>,
        config: HttpRequestConfig,
    ) -> Result<HttpResponse, HttpError> {
        self.request(HttpMethod::Put, url, body, config).await
    }

    /// Performs an HTTP DELETE request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    async fn delete(
        &self,
        url: &str,
        config: HttpRequestConfig,
    ) -> Result<HttpResponse, HttpError> {
        self.request(HttpMethod::Delete, url, None, config).await
    }

    /// Performs an HTTP PATCH request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    async fn patch(
        &self,
        url: &str,
        body: Option<serde_json::Value>,
        config: HttpRequestConfig,
    ) -> Result<HttpResponse, HttpError> {
        self.request(HttpMethod::Patch, url, body, config).await
    }
}

/// Production transport built on `reqwest`.
///
/// The client:
/// - Sends `config.headers` verbatim
/// - Appends `config.params` as a query string, omitting `null` values
/// - Applies `config.timeout`
/// - Honours the [`MAX_REDIRECTS`] entry of `config.extra` and ignores any
///   other `extra` key
/// - Parses the body as JSON (empty body becomes `{}`)
/// - Reports non-2xx responses as [`HttpError`] with the envelope attached
///
/// # Thread Safety
///
/// `ReqwestHttpClient` is `Send + Sync` and cheap to clone.
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

// Verify ReqwestHttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestHttpClient>();
};

impl ReqwestHttpClient {
    /// Creates a transport with a rustls-backed reqwest client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the underlying client cannot be created
    /// (e.g., TLS initialization failure).
    pub fn new() -> Result<Self, HttpError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self { client })
    }

    /// Wraps an already-configured reqwest client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Picks the reqwest client for a request.
    ///
    /// A [`MAX_REDIRECTS`] override needs its own redirect policy, so it gets
    /// a one-off client; everything else shares `self.client`.
    fn client_for(&self, config: &HttpRequestConfig) -> Result<Cow<'_, reqwest::Client>, HttpError> {
        let Some(limit) = config.extra.get(MAX_REDIRECTS).and_then(serde_json::Value::as_u64) else {
            return Ok(Cow::Borrowed(&self.client));
        };

        let policy = if limit == 0 {
            Policy::none()
        } else {
            Policy::limited(usize::try_from(limit).unwrap_or(usize::MAX))
        };
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .redirect(policy)
            .build()?;
        Ok(Cow::Owned(client))
    }

    /// Parses response headers into a `HashMap` with lower-cased names.
    ///
    /// Repeated headers are joined with `", "`.
    fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        let mut result: HashMap<String, String> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default();
            result
                .entry(key)
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }
        result
    }

    /// Parses a response body as JSON.
    ///
    /// An empty body becomes `{}`; a body that is not JSON is kept as
    /// `{"raw_body": "..."}`.
    fn parse_body(body_text: String) -> serde_json::Value {
        if body_text.is_empty() {
            return serde_json::json!({});
        }
        serde_json::from_str(&body_text)
            .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<serde_json::Value>,
        config: HttpRequestConfig,
    ) -> Result<HttpResponse, HttpError> {
        let url = build_url_with_query(url, &config.params);
        tracing::debug!("{} {}", method, url);

        let client = self
            .client_for(&config)
            .map_err(|e| e.with_config(config.clone()))?;
        let mut req_builder = match method {
            HttpMethod::Get => client.get(&url),
            HttpMethod::Post => client.post(&url),
            HttpMethod::Put => client.put(&url),
            HttpMethod::Delete => client.delete(&url),
            HttpMethod::Patch => client.patch(&url),
        };

        for (key, value) in &config.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(timeout) = config.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        if let Some(body) = &body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder
            .send()
            .await
            .map_err(|e| HttpError::from(e).with_config(config.clone()))?;

        let status = res.status();
        let headers = Self::parse_response_headers(res.headers());
        let body_text = res
            .text()
            .await
            .map_err(|e| HttpError::from(e).with_config(config.clone()))?;

        let response = HttpResponse {
            data: Self::parse_body(body_text),
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            config,
        };

        if response.is_ok() {
            return Ok(response);
        }

        tracing::warn!(
            "Reverb API request {} {} failed with status {}",
            method,
            url,
            response.status
        );
        Err(HttpError::from_response(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_empty_is_object() {
        assert_eq!(
            ReqwestHttpClient::parse_body(String::new()),
            serde_json::json!({})
        );
    }

    #[test]
    fn test_parse_body_keeps_non_json_as_raw() {
        let value = ReqwestHttpClient::parse_body("<html>oops</html>".to_string());
        assert_eq!(value["raw_body"], "<html>oops</html>");
    }

    #[test]
    fn test_parse_body_json() {
        let value = ReqwestHttpClient::parse_body(r#"{"total": 3}"#.to_string());
        assert_eq!(value["total"], 3);
    }

    #[test]
    fn test_parse_response_headers_lowercases_and_joins() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.append("X-Request-Id", "abc".parse().unwrap());
        headers.append("Vary", "Accept".parse().unwrap());
        headers.append("Vary", "Accept-Language".parse().unwrap());

        let parsed = ReqwestHttpClient::parse_response_headers(&headers);

        assert_eq!(parsed.get("x-request-id"), Some(&"abc".to_string()));
        assert_eq!(parsed.get("vary"), Some(&"Accept, Accept-Language".to_string()));
    }

    #[test]
    fn test_client_for_shares_client_without_redirect_override() {
        let http = ReqwestHttpClient::new().unwrap();

        let shared = http.client_for(&HttpRequestConfig::new().extra("unknown", 1)).unwrap();
        assert!(matches!(shared, Cow::Borrowed(_)));

        let own = http
            .client_for(&HttpRequestConfig::new().max_redirects(0))
            .unwrap();
        assert!(matches!(own, Cow::Owned(_)));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestHttpClient>();
    }
}
