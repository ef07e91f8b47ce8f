//! Transport error type for the Reverb API SDK.
//!
//! Every [`HttpClient`](crate::clients::HttpClient) implementation reports
//! failures as an [`HttpError`]. Endpoint wrappers and the pagination driver
//! propagate it untouched.
//!
//! # Example
//!
//! ```rust,ignore
//! use reverb_api::clients::HttpError;
//!
//! match client.get_root().await {
//!     Ok(response) => println!("Root: {}", response.data),
//!     Err(ReverbError::Http(e)) if e.is_network_error => {
//!         println!("Network error: {}", e);
//!     }
//!     Err(ReverbError::Http(e)) => {
//!         println!("API error {:?}: {}", e.status, e.message);
//!     }
//!     Err(other) => println!("{other}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpMethod, HttpRequestConfig, HttpResponse};

/// Error returned when a request could not be completed.
///
/// Either no response was received (`is_network_error` is `true` and
/// `status` is `None`), or the server answered with a non-2xx status, in
/// which case the full response envelope is attached. A request that could
/// not be built at all (e.g. a header value with a newline) has neither a
/// status nor `is_network_error` set.
///
/// # Example
///
/// ```rust
/// use reverb_api::clients::{HttpError, HttpResponse};
/// use serde_json::json;
///
/// let error = HttpError::from_response(HttpResponse::new(404, "Not Found", json!({})));
/// assert_eq!(error.status, Some(404));
/// assert!(!error.is_network_error);
/// assert_eq!(error.to_string(), "Request failed with status code 404");
/// ```
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct HttpError {
    /// Human-readable description of the failure.
    pub message: String,
    /// HTTP status code, if a response was received.
    pub status: Option<u16>,
    /// The response envelope, if a response was received.
    pub response: Option<Box<HttpResponse>>,
    /// Whether the failure happened before a response was received.
    pub is_network_error: bool,
    /// The configuration the request was sent with, if known.
    pub config: Option<HttpRequestConfig>,
}

impl HttpError {
    /// Creates an error for a request that never received a response.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            response: None,
            is_network_error: true,
            config: None,
        }
    }

    /// Creates an error for a request that could not be built, so nothing
    /// was sent.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            response: None,
            is_network_error: false,
            config: None,
        }
    }

    /// Creates an error from a non-successful response.
    #[must_use]
    pub fn from_response(response: HttpResponse) -> Self {
        Self {
            message: format!("Request failed with status code {}", response.status),
            status: Some(response.status),
            config: Some(response.config.clone()),
            response: Some(Box::new(response)),
            is_network_error: false,
        }
    }

    /// Creates the error a test double raises for an unmatched request.
    #[must_use]
    pub fn no_mock(method: HttpMethod, url: &str, config: HttpRequestConfig) -> Self {
        Self {
            message: format!("No mock found for {method} {url}"),
            status: None,
            response: None,
            is_network_error: false,
            config: Some(config),
        }
    }

    /// Attaches the request configuration.
    #[must_use]
    pub fn with_config(mut self, config: HttpRequestConfig) -> Self {
        self.config = Some(config);
        self
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            return Self::invalid_request(format!("Invalid request: {error}"));
        }
        Self::network(format!("Network error: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_network_error_has_no_status() {
        let error = HttpError::network("connection reset");
        assert!(error.is_network_error);
        assert!(error.status.is_none());
        assert!(error.response.is_none());
        assert_eq!(error.to_string(), "connection reset");
    }

    #[test]
    fn test_from_response_carries_envelope() {
        let response = HttpResponse::new(422, "Unprocessable Entity", json!({"message": "bad"}));
        let error = HttpError::from_response(response);

        assert_eq!(error.status, Some(422));
        assert!(!error.is_network_error);
        let envelope = error.response.unwrap();
        assert_eq!(envelope.data["message"], "bad");
    }

    #[test]
    fn test_invalid_request_is_not_network_error() {
        let error = HttpError::invalid_request("Invalid request: bad header");
        assert!(!error.is_network_error);
        assert!(error.status.is_none());
        assert!(error.response.is_none());
    }

    #[tokio::test]
    async fn test_reqwest_builder_error_is_not_network_error() {
        let reqwest_error = reqwest::Client::new()
            .get("https://api.reverb.com/api/")
            .header("X-Shipping-Region", "US\nCON")
            .send()
            .await
            .unwrap_err();
        assert!(reqwest_error.is_builder());

        let error = HttpError::from(reqwest_error);
        assert!(!error.is_network_error);
        assert!(error.message.starts_with("Invalid request: "));
    }

    #[test]
    fn test_no_mock_message() {
        let error = HttpError::no_mock(
            HttpMethod::Get,
            "https://api.reverb.com/api/my/listings",
            HttpRequestConfig::default(),
        );
        assert_eq!(
            error.to_string(),
            "No mock found for GET https://api.reverb.com/api/my/listings"
        );
        assert!(error.config.is_some());
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: &dyn std::error::Error = &HttpError::network("x");
        let _ = error;
    }
}
