//! In-memory test double for [`HttpClient`].
//!
//! [`MockHttpClient`] answers requests from registered mocks instead of the
//! network and records every request it sees. A request that matches no
//! mock fails with `"No mock found for METHOD URL"` rather than returning an
//! empty response.
//!
//! # Example
//!
//! ```rust
//! use reverb_api::clients::{create_mock_response, HttpClient, HttpRequestConfig, MockHttpClient};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let http = MockHttpClient::new();
//! http.on_get(
//!     |url, _| url.ends_with("/my/listings"),
//!     create_mock_response(json!({"listings": []}), 200, "OK"),
//! );
//!
//! let response = http
//!     .get("https://api.reverb.com/api/my/listings", HttpRequestConfig::new())
//!     .await
//!     .unwrap();
//! assert_eq!(response.data["listings"], json!([]));
//! assert_eq!(http.requests().len(), 1);
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequestConfig, HttpResponse};

/// Decides whether a mock applies to a request.
pub type RequestMatcher = Box<dyn Fn(&str, &HttpRequestConfig) -> bool + Send + Sync>;

/// Builds a response from the request URL, config and body.
pub type ResponseGenerator =
    Arc<dyn Fn(&str, &HttpRequestConfig, Option<&serde_json::Value>) -> HttpResponse + Send + Sync>;

/// What a matched mock answers with.
pub enum MockReply {
    /// The same response every time.
    Static(HttpResponse),
    /// A response computed per request.
    Generated(ResponseGenerator),
}

/// A registered mock.
pub struct MockResponse {
    /// Matcher deciding whether this mock handles a request.
    pub matcher: RequestMatcher,
    /// Response returned when no `error` is set.
    pub reply: MockReply,
    /// Error returned instead of the reply, if set.
    pub error: Option<HttpError>,
    /// Remaining uses; `None` means unlimited.
    pub times: Option<u32>,
}

impl MockResponse {
    /// Creates a mock answering with a fixed response.
    pub fn new(
        matcher: impl Fn(&str, &HttpRequestConfig) -> bool + Send + Sync + 'static,
        response: HttpResponse,
    ) -> Self {
        Self {
            matcher: Box::new(matcher),
            reply: MockReply::Static(response),
            error: None,
            times: None,
        }
    }

    /// Creates a mock computing its response per request.
    pub fn generated(
        matcher: impl Fn(&str, &HttpRequestConfig) -> bool + Send + Sync + 'static,
        generator: impl Fn(&str, &HttpRequestConfig, Option<&serde_json::Value>) -> HttpResponse
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            matcher: Box::new(matcher),
            reply: MockReply::Generated(Arc::new(generator)),
            error: None,
            times: None,
        }
    }

    /// Creates a mock that fails with `error`.
    pub fn failing(
        matcher: impl Fn(&str, &HttpRequestConfig) -> bool + Send + Sync + 'static,
        error: HttpError,
    ) -> Self {
        Self {
            matcher: Box::new(matcher),
            reply: MockReply::Static(create_mock_response(serde_json::json!({}), 200, "OK")),
            error: Some(error),
            times: None,
        }
    }

    /// Limits how many requests this mock answers.
    #[must_use]
    pub const fn times(mut self, times: u32) -> Self {
        self.times = Some(times);
        self
    }
}

/// A request recorded by [`MockHttpClient`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The URL as passed to the transport.
    pub url: String,
    /// The request configuration.
    pub config: HttpRequestConfig,
    /// The request body, if any.
    pub body: Option<serde_json::Value>,
}

/// Mock transport for tests.
///
/// Mocks are tried in registration order for the request's method. A mock
/// with exhausted `times` is skipped.
#[derive(Default)]
pub struct MockHttpClient {
    mocks: Mutex<HashMap<HttpMethod, Vec<MockResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttpClient {
    /// Creates a mock client with no mocks registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mock for `method`.
    pub fn on_request(&self, method: HttpMethod, mock: MockResponse) {
        self.mocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(method)
            .or_default()
            .push(mock);
    }

    /// Registers a fixed GET response.
    pub fn on_get(
        &self,
        matcher: impl Fn(&str, &HttpRequestConfig) -> bool + Send + Sync + 'static,
        response: HttpResponse,
    ) {
        self.on_request(HttpMethod::Get, MockResponse::new(matcher, response));
    }

    /// Registers a fixed POST response.
    pub fn on_post(
        &self,
        matcher: impl Fn(&str, &HttpRequestConfig) -> bool + Send + Sync + 'static,
        response: HttpResponse,
    ) {
        self.on_request(HttpMethod::Post, MockResponse::new(matcher, response));
    }

    /// Registers a fixed PUT response.
    pub fn on_put(
        &self,
        matcher: impl Fn(&str, &HttpRequestConfig) -> bool + Send + Sync + 'static,
        response: HttpResponse,
    ) {
        self.on_request(HttpMethod::Put, MockResponse::new(matcher, response));
    }

    /// Registers a fixed DELETE response.
    pub fn on_delete(
        &self,
        matcher: impl Fn(&str, &HttpRequestConfig) -> bool + Send + Sync + 'static,
        response: HttpResponse,
    ) {
        self.on_request(HttpMethod::Delete, MockResponse::new(matcher, response));
    }

    /// Registers a fixed PATCH response.
    pub fn on_patch(
        &self,
        matcher: impl Fn(&str, &HttpRequestConfig) -> bool + Send + Sync + 'static,
        response: HttpResponse,
    ) {
        self.on_request(HttpMethod::Patch, MockResponse::new(matcher, response));
    }

    /// Returns every recorded request, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns recorded requests for one method.
    #[must_use]
    pub fn requests_by_method(&self, method: HttpMethod) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|req| req.method == method)
            .collect()
    }

    /// Clears recorded requests.
    pub fn clear_requests(&self) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Clears registered mocks.
    pub fn clear_mocks(&self) {
        self.mocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Clears both recorded requests and registered mocks.
    pub fn reset(&self) {
        self.clear_requests();
        self.clear_mocks();
    }

    fn handle_request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<serde_json::Value>,
        config: HttpRequestConfig,
    ) -> Result<HttpResponse, HttpError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method,
                url: url.to_string(),
                config: config.clone(),
                body: body.clone(),
            });

        let reply = self.take_reply(method, url, &config);
        match reply {
            Some(Err(error)) => Err(error),
            Some(Ok(MockReply::Static(response))) => Ok(response),
            Some(Ok(MockReply::Generated(generate))) => Ok(generate(url, &config, body.as_ref())),
            None => Err(HttpError::no_mock(method, url, config)),
        }
    }

    /// Finds the first usable mock and returns a copy of its outcome.
    ///
    /// The lock is released before the caller runs a generator.
    fn take_reply(
        &self,
        method: HttpMethod,
        url: &str,
        config: &HttpRequestConfig,
    ) -> Option<Result<MockReply, HttpError>> {
        let mut mocks = self.mocks.lock().unwrap_or_else(PoisonError::into_inner);
        let candidates = mocks.get_mut(&method)?;
        for mock in candidates.iter_mut() {
            if !(mock.matcher)(url, config) {
                continue;
            }

            if let Some(remaining) = mock.times {
                if remaining == 0 {
                    continue;
                }
                mock.times = Some(remaining - 1);
            }

            if let Some(error) = &mock.error {
                return Some(Err(error.clone()));
            }

            return Some(Ok(match &mock.reply {
                MockReply::Static(response) => MockReply::Static(response.clone()),
                MockReply::Generated(generate) => MockReply::Generated(Arc::clone(generate)),
            }));
        }
        None
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<serde_json::Value>,
        config: HttpRequestConfig,
    ) -> Result<HttpResponse, HttpError> {
        self.handle_request(method, url, body, config)
    }
}

/// Creates a successful response envelope for a mock.
#[must_use]
pub fn create_mock_response(
    data: serde_json::Value,
    status: u16,
    status_text: &str,
) -> HttpResponse {
    HttpResponse::new(status, status_text, data)
}

/// Creates a transport error for a mock.
///
/// With a `status` the error looks like a non-2xx answer; without one it is
/// reported as a network error.
#[must_use]
pub fn create_mock_error(
    message: &str,
    status: Option<u16>,
    response: Option<HttpResponse>,
) -> HttpError {
    HttpError {
        message: message.to_string(),
        status,
        response: response.map(Box::new),
        is_network_error: status.is_none(),
        config: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Weak;

    #[tokio::test]
    async fn test_unmatched_request_fails_loudly() {
        let http = MockHttpClient::new();

        let err = http
            .get("https://api.reverb.com/api/nope", HttpRequestConfig::new())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "No mock found for GET https://api.reverb.com/api/nope"
        );
        assert_eq!(http.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_mocks_are_keyed_by_method() {
        let http = MockHttpClient::new();
        http.on_post(|_, _| true, create_mock_response(json!({"id": 1}), 201, "Created"));

        assert!(http.get("https://x.com/a", HttpRequestConfig::new()).await.is_err());

        let response = http
            .post("https://x.com/a", Some(json!({"make": "Fender"})), HttpRequestConfig::new())
            .await
            .unwrap();
        assert_eq!(response.status, 201);

        let posts = http.requests_by_method(HttpMethod::Post);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].body, Some(json!({"make": "Fender"})));
    }

    #[tokio::test]
    async fn test_times_limits_uses_then_falls_through() {
        let http = MockHttpClient::new();
        http.on_request(
            HttpMethod::Get,
            MockResponse::new(|_, _| true, create_mock_response(json!("first"), 200, "OK"))
                .times(1),
        );
        http.on_get(|_, _| true, create_mock_response(json!("second"), 200, "OK"));

        let a = http.get("https://x.com", HttpRequestConfig::new()).await.unwrap();
        let b = http.get("https://x.com", HttpRequestConfig::new()).await.unwrap();

        assert_eq!(a.data, json!("first"));
        assert_eq!(b.data, json!("second"));
    }

    #[tokio::test]
    async fn test_generated_response_sees_request() {
        let http = MockHttpClient::new();
        http.on_request(
            HttpMethod::Put,
            MockResponse::generated(
                |url, _| url.contains("/listings/"),
                |url, _, body| {
                    create_mock_response(json!({"url": url, "echo": body.cloned()}), 200, "OK")
                },
            ),
        );

        let response = http
            .put("https://x.com/listings/7", Some(json!({"price": 1})), HttpRequestConfig::new())
            .await
            .unwrap();

        assert_eq!(response.data["url"], "https://x.com/listings/7");
        assert_eq!(response.data["echo"]["price"], 1);
    }

    #[tokio::test]
    async fn test_generator_can_register_follow_up_mock() {
        let http = Arc::new(MockHttpClient::new());
        let handle: Weak<MockHttpClient> = Arc::downgrade(&http);
        http.on_request(
            HttpMethod::Get,
            MockResponse::generated(
                |url, _| url.ends_with("/first"),
                move |_, _, _| {
                    if let Some(http) = handle.upgrade() {
                        http.on_get(
                            |url, _| url.ends_with("/second"),
                            create_mock_response(json!({"step": 2}), 200, "OK"),
                        );
                    }
                    create_mock_response(json!({"step": 1}), 200, "OK")
                },
            ),
        );

        let first = http.get("https://x.com/first", HttpRequestConfig::new()).await.unwrap();
        let second = http.get("https://x.com/second", HttpRequestConfig::new()).await.unwrap();

        assert_eq!(first.data["step"], 1);
        assert_eq!(second.data["step"], 2);
    }

    #[tokio::test]
    async fn test_failing_mock_returns_error() {
        let http = MockHttpClient::new();
        http.on_request(
            HttpMethod::Delete,
            MockResponse::failing(|_, _| true, create_mock_error("gone", Some(410), None)),
        );

        let err = http
            .delete("https://x.com/listings/1", HttpRequestConfig::new())
            .await
            .unwrap_err();

        assert_eq!(err.status, Some(410));
        assert!(!err.is_network_error);
    }

    #[tokio::test]
    async fn test_reset_clears_mocks_and_requests() {
        let http = MockHttpClient::new();
        http.on_patch(|_, _| true, create_mock_response(json!({}), 200, "OK"));
        http.patch("https://x.com", None, HttpRequestConfig::new())
            .await
            .unwrap();

        http.reset();

        assert!(http.requests().is_empty());
        assert!(http
            .patch("https://x.com", None, HttpRequestConfig::new())
            .await
            .is_err());
    }

    #[test]
    fn test_create_mock_error_without_status_is_network_error() {
        let error = create_mock_error("timeout", None, None);
        assert!(error.is_network_error);
    }
}
