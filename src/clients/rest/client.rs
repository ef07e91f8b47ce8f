//! REST client implementation for the Reverb API.
//!
//! This module provides the [`ReverbClient`] type, which pairs a
//! [`ReverbConfig`] with an injected [`HttpClient`] transport and offers
//! verb helpers that attach the derived headers to every request.

use std::fmt;
use std::sync::Arc;

use crate::clients::{HttpClient, HttpRequestConfig, HttpResponse, ReqwestHttpClient};
use crate::config::{ReverbConfig, RequestProfile};
use crate::error::ReverbError;
use crate::rest::build_url;

/// Options for [`ReverbClient::get_arbitrary_endpoint`].
///
/// `url` may be a path relative to the base endpoint or an absolute
/// `http://`/`https://` URL. `config` is merged over the derived request
/// configuration, so its params and headers are passed through.
///
/// # Example
///
/// ```rust
/// use reverb_api::clients::GetArbitraryEndpointOptions;
///
/// let options = GetArbitraryEndpointOptions::new("categories/flat")
///     .param("per_page", "100");
/// assert_eq!(options.url, "categories/flat");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetArbitraryEndpointOptions {
    /// Relative path or absolute URL.
    pub url: String,
    /// Extra request configuration.
    pub config: HttpRequestConfig,
}

impl GetArbitraryEndpointOptions {
    /// Creates options for `url` with no extra configuration.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            config: HttpRequestConfig::default(),
        }
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.config = self.config.param(key, value);
        self
    }
}

/// REST API client for the Reverb marketplace.
///
/// Holds the client configuration and the transport. Resource wrappers in
/// [`crate::rest::resources`] take a `&ReverbClient` and read its
/// [`RequestProfile`] to build each request.
///
/// # Thread Safety
///
/// `ReverbClient` is `Send + Sync`. Configuration setters need
/// `&mut ReverbClient` through [`ReverbClient::config_mut`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use reverb_api::{ReverbClient, ReverbConfig};
/// use reverb_api::clients::MockHttpClient;
///
/// let config = ReverbConfig::builder().api_key("key").build().unwrap();
/// let mut client = ReverbClient::with_http_client(config, Arc::new(MockHttpClient::new()));
///
/// client.config_mut().set_locale("fr");
/// assert_eq!(client.request_profile().locale, "fr");
/// ```
pub struct ReverbClient {
    config: ReverbConfig,
    http: Arc<dyn HttpClient>,
}

// Verify ReverbClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReverbClient>();
};

impl fmt::Debug for ReverbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReverbClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReverbClient {
    /// Creates a client using the default reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`ReverbError::Http`] if the transport cannot be created.
    pub fn new(config: ReverbConfig) -> Result<Self, ReverbError> {
        let http = ReqwestHttpClient::new()?;
        Ok(Self::with_http_client(config, Arc::new(http)))
    }

    /// Creates a client with an injected transport.
    #[must_use]
    pub fn with_http_client(config: ReverbConfig, http: Arc<dyn HttpClient>) -> Self {
        Self { config, http }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ReverbConfig {
        &self.config
    }

    /// Returns the configuration for mutation.
    pub fn config_mut(&mut self) -> &mut ReverbConfig {
        &mut self.config
    }

    /// Returns the current request profile.
    #[must_use]
    pub const fn request_profile(&self) -> &RequestProfile {
        self.config.request_profile()
    }

    /// Returns the transport.
    #[must_use]
    pub fn http(&self) -> &dyn HttpClient {
        self.http.as_ref()
    }

    /// Builds the request configuration for the current profile, with
    /// `overrides` merged on top.
    #[must_use]
    pub fn request_config(&self, overrides: HttpRequestConfig) -> HttpRequestConfig {
        HttpRequestConfig::with_headers(&self.request_profile().headers).merge(overrides)
    }

    /// Resolves `path` against the base endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ReverbError::InvalidPath`] if `path` is empty.
    pub fn url(&self, path: &str) -> Result<String, ReverbError> {
        if path.trim().is_empty() {
            return Err(ReverbError::InvalidPath {
                path: path.to_string(),
            });
        }
        Ok(build_url(self.request_profile().base_endpoint.as_ref(), path))
    }

    /// Sends a GET request to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReverbError::InvalidPath`] for an empty path and
    /// [`ReverbError::Http`] for transport failures.
    pub async fn get(
        &self,
        path: &str,
        config: HttpRequestConfig,
    ) -> Result<HttpResponse, ReverbError> {
        let url = self.url(path)?;
        tracing::debug!("Reverb GET {}", url);
        Ok(self.http.get(&url, self.request_config(config)).await?)
    }

    /// Sends a POST request with a JSON body to `path`.
    ///
    /// # Errors
    ///
    /// Same as [`ReverbClient::get`].
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
        config: HttpRequestConfig,
    ) -> Result<HttpResponse, ReverbError> {
        let url = self.url(path)?;
        tracing::debug!("Reverb POST {}", url);
        Ok(self
            .http
            .post(&url, Some(body), self.request_config(config))
            .await?)
    }

    /// Sends a PUT request with a JSON body to `path`.
    ///
    /// # Errors
    ///
    /// Same as [`ReverbClient::get`].
    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
        config: HttpRequestConfig,
    ) -> Result<HttpResponse, ReverbError> {
        let url = self.url(path)?;
        tracing::debug!("Reverb PUT {}", url);
        Ok(self
            .http
            .put(&url, Some(body), self.request_config(config))
            .await?)
    }

    /// Sends a PATCH request with a JSON body to `path`.
    ///
    /// # Errors
    ///
    /// Same as [`ReverbClient::get`].
    pub async fn patch(
        &self,
        path: &str,
        body: serde_json::Value,
        config: HttpRequestConfig,
    ) -> Result<HttpResponse, ReverbError> {
        let url = self.url(path)?;
        tracing::debug!("Reverb PATCH {}", url);
        Ok(self
            .http
            .patch(&url, Some(body), self.request_config(config))
            .await?)
    }

    /// Sends a DELETE request to `path`.
    ///
    /// # Errors
    ///
    /// Same as [`ReverbClient::get`].
    pub async fn delete(
        &self,
        path: &str,
        config: HttpRequestConfig,
    ) -> Result<HttpResponse, ReverbError> {
        let url = self.url(path)?;
        tracing::debug!("Reverb DELETE {}", url);
        Ok(self.http.delete(&url, self.request_config(config)).await?)
    }

    /// Retrieves the API root (`GET <base>/`).
    ///
    /// # Errors
    ///
    /// Returns [`ReverbError::Http`] for transport failures.
    pub async fn get_root(&self) -> Result<HttpResponse, ReverbError> {
        self.get("/", HttpRequestConfig::default()).await
    }

    /// Sends a GET request to an arbitrary relative or absolute URL.
    ///
    /// # Errors
    ///
    /// Same as [`ReverbClient::get`].
    pub async fn get_arbitrary_endpoint(
        &self,
        options: GetArbitraryEndpointOptions,
    ) -> Result<HttpResponse, ReverbError> {
        self.get(&options.url, options.config).await
    }
}
