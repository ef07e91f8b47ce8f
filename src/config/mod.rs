//! Configuration types for the Reverb API SDK.
//!
//! This module provides the client-level configuration and the values
//! derived from it for every outbound request.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ReverbConfig`]: Mutable client settings with derived headers and profile
//! - [`ReverbConfigBuilder`]: A builder for constructing [`ReverbConfig`] instances
//! - [`ReverbOptions`]: The plain construction input, loadable from serde or the environment
//! - [`HeaderSet`]: The derived request headers
//! - [`RequestProfile`]: A snapshot handed to endpoint wrappers
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`BaseEndpoint`]: A validated, domain-rooted API root URL
//!
//! # Derivation
//!
//! Every setter overwrites its field and then re-derives. Version, currency,
//! locale and region setters rebuild the [`HeaderSet`] and then the
//! [`RequestProfile`]. [`ReverbConfig::set_base_endpoint`] rebuilds only the
//! profile: headers do not depend on the endpoint, and the existing header
//! set is kept as-is.
//!
//! # Example
//!
//! ```rust
//! use reverb_api::ReverbConfig;
//!
//! let mut config = ReverbConfig::builder()
//!     .api_key("my-api-key")
//!     .locale("fr")
//!     .build()
//!     .unwrap();
//!
//! config.set_display_currency("EUR");
//! assert_eq!(config.headers().get("X-Display-Currency"), Some("EUR"));
//! assert_eq!(config.request_profile().display_currency, "EUR");
//! ```

mod headers;
mod newtypes;
mod profile;

pub use headers::{
    names as header_names, HeaderSet, DEFAULT_API_VERSION, DEFAULT_DISPLAY_CURRENCY,
    DEFAULT_LOCALE, HAL_JSON, SDK_VERSION, USER_AGENT,
};
pub use newtypes::{ApiKey, BaseEndpoint};
pub use profile::RequestProfile;

use std::sync::Arc;

use serde::Deserialize;

use crate::error::ConfigError;

/// Raw construction input for [`ReverbConfig`].
///
/// All fields except `api_key` are optional; empty strings are treated the
/// same as absent values and fall back to the defaults.
///
/// Field names accept both `snake_case` and the `camelCase` spelling used by
/// the marketplace's other SDKs, so options can be read from JSON files:
///
/// ```rust
/// use reverb_api::ReverbOptions;
///
/// let options: ReverbOptions = serde_json::from_str(
///     r#"{"apiKey": "abc", "displayCurrency": "GBP"}"#,
/// ).unwrap();
/// assert_eq!(options.api_key, "abc");
/// assert_eq!(options.display_currency.as_deref(), Some("GBP"));
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ReverbOptions {
    /// The API key (required, non-empty).
    #[serde(default, alias = "apiKey")]
    pub api_key: String,
    /// API version, default `"3.0"`.
    #[serde(default, alias = "apiVersion", alias = "version")]
    pub api_version: Option<String>,
    /// Base endpoint, default `https://api.reverb.com/api`.
    #[serde(default, alias = "baseEndpoint", alias = "rootEndpoint")]
    pub base_endpoint: Option<String>,
    /// Display currency, default `"USD"`.
    #[serde(default, alias = "displayCurrency")]
    pub display_currency: Option<String>,
    /// Shipping region, absent by default.
    #[serde(default, alias = "shippingRegion")]
    pub shipping_region: Option<String>,
    /// Locale, default `"en"`.
    #[serde(default)]
    pub locale: Option<String>,
}

impl ReverbOptions {
    /// Environment variable holding the API key.
    pub const ENV_API_KEY: &'static str = "REVERB_API_KEY";
    /// Environment variable holding the API version.
    pub const ENV_API_VERSION: &'static str = "REVERB_API_VERSION";
    /// Environment variable holding the base endpoint.
    pub const ENV_BASE_ENDPOINT: &'static str = "REVERB_BASE_ENDPOINT";
    /// Environment variable holding the display currency.
    pub const ENV_DISPLAY_CURRENCY: &'static str = "REVERB_DISPLAY_CURRENCY";
    /// Environment variable holding the shipping region.
    pub const ENV_SHIPPING_REGION: &'static str = "REVERB_SHIPPING_REGION";
    /// Environment variable holding the locale.
    pub const ENV_LOCALE: &'static str = "REVERB_LOCALE";

    /// Reads options from `REVERB_*` environment variables.
    ///
    /// A missing `REVERB_API_KEY` leaves `api_key` empty, which
    /// [`ReverbConfig::new`] rejects.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_key: lookup(Self::ENV_API_KEY).unwrap_or_default(),
            api_version: lookup(Self::ENV_API_VERSION),
            base_endpoint: lookup(Self::ENV_BASE_ENDPOINT),
            display_currency: lookup(Self::ENV_DISPLAY_CURRENCY),
            shipping_region: lookup(Self::ENV_SHIPPING_REGION),
            locale: lookup(Self::ENV_LOCALE),
        }
    }
}

/// Configuration for the Reverb API SDK.
///
/// Holds the client-level settings and the [`HeaderSet`] and
/// [`RequestProfile`] derived from them. The derived values are recomputed
/// by each setter before it returns, so a read always reflects the current
/// fields.
///
/// # Thread Safety
///
/// `ReverbConfig` is `Clone`, `Send`, and `Sync`. Setters take `&mut self`;
/// a configuration shared between tasks must be wrapped by the caller
/// (e.g. in an `RwLock`) so mutations are serialized.
///
/// # Example
///
/// ```rust
/// use reverb_api::ReverbConfig;
///
/// let config = ReverbConfig::builder().api_key("abc").build().unwrap();
///
/// assert_eq!(config.api_version(), "3.0");
/// assert_eq!(config.display_currency(), "USD");
/// assert_eq!(config.locale(), "en");
/// assert!(config.shipping_region().is_none());
/// assert_eq!(config.headers().get("Authorization"), Some("Bearer abc"));
/// ```
#[derive(Clone, Debug)]
pub struct ReverbConfig {
    api_key: ApiKey,
    api_version: String,
    base_endpoint: BaseEndpoint,
    display_currency: String,
    locale: String,
    shipping_region: Option<String>,
    headers: Arc<HeaderSet>,
    profile: RequestProfile,
}

// Verify ReverbConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReverbConfig>();
};

impl ReverbConfig {
    /// Creates a configuration from raw options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if `api_key` is empty, or
    /// [`ConfigError::InvalidBaseEndpoint`] if `base_endpoint` is not a
    /// domain-rooted URL.
    pub fn new(options: ReverbOptions) -> Result<Self, ConfigError> {
        let api_key = ApiKey::new(options.api_key)?;
        let base_endpoint = match non_empty(options.base_endpoint) {
            Some(url) => BaseEndpoint::new(url)?,
            None => BaseEndpoint::default(),
        };

        Ok(Self::from_parts(
            api_key,
            non_empty(options.api_version).unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            base_endpoint,
            non_empty(options.display_currency)
                .unwrap_or_else(|| DEFAULT_DISPLAY_CURRENCY.to_string()),
            non_empty(options.locale).unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            non_empty(options.shipping_region),
        ))
    }

    /// Creates a configuration from `REVERB_*` environment variables.
    ///
    /// # Errors
    ///
    /// Same as [`ReverbConfig::new`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ReverbOptions::from_env())
    }

    /// Creates a new builder for constructing a `ReverbConfig`.
    #[must_use]
    pub fn builder() -> ReverbConfigBuilder {
        ReverbConfigBuilder::new()
    }

    fn from_parts(
        api_key: ApiKey,
        api_version: String,
        base_endpoint: BaseEndpoint,
        display_currency: String,
        locale: String,
        shipping_region: Option<String>,
    ) -> Self {
        let headers = Arc::new(HeaderSet::derive(
            &api_key,
            &api_version,
            &display_currency,
            &locale,
            shipping_region.as_deref(),
        ));
        let profile = RequestProfile {
            base_endpoint: base_endpoint.clone(),
            api_key: api_key.clone(),
            headers: Arc::clone(&headers),
            api_version: api_version.clone(),
            locale: locale.clone(),
            display_currency: display_currency.clone(),
            shipping_region: shipping_region.clone(),
        };

        Self {
            api_key,
            api_version,
            base_endpoint,
            display_currency,
            locale,
            shipping_region,
            headers,
            profile,
        }
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API version.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Returns the base endpoint.
    #[must_use]
    pub const fn base_endpoint(&self) -> &BaseEndpoint {
        &self.base_endpoint
    }

    /// Returns the display currency.
    #[must_use]
    pub fn display_currency(&self) -> &str {
        &self.display_currency
    }

    /// Returns the locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Returns the shipping region, if set.
    #[must_use]
    pub fn shipping_region(&self) -> Option<&str> {
        self.shipping_region.as_deref()
    }

    /// Returns the derived header set.
    #[must_use]
    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    /// Returns a shared handle to the derived header set.
    #[must_use]
    pub fn shared_headers(&self) -> Arc<HeaderSet> {
        Arc::clone(&self.headers)
    }

    /// Returns the derived request profile.
    #[must_use]
    pub const fn request_profile(&self) -> &RequestProfile {
        &self.profile
    }

    /// Sets the API version and re-derives headers and profile.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.api_version = version.into();
        tracing::debug!("Reverb config: API version set to {}", self.api_version);
        self.refresh_headers();
        self.refresh_profile();
    }

    /// Sets the display currency and re-derives headers and profile.
    pub fn set_display_currency(&mut self, currency: impl Into<String>) {
        self.display_currency = currency.into();
        tracing::debug!(
            "Reverb config: display currency set to {}",
            self.display_currency
        );
        self.refresh_headers();
        self.refresh_profile();
    }

    /// Sets the shipping region and re-derives headers and profile.
    ///
    /// An empty region is stored as absent, so the `X-Shipping-Region`
    /// header is never sent with an empty value.
    pub fn set_shipping_region(&mut self, region: impl Into<String>) {
        self.shipping_region = non_empty(Some(region.into()));
        tracing::debug!(
            "Reverb config: shipping region set to {:?}",
            self.shipping_region
        );
        self.refresh_headers();
        self.refresh_profile();
    }

    /// Removes the shipping region and re-derives headers and profile.
    pub fn clear_shipping_region(&mut self) {
        self.shipping_region = None;
        tracing::debug!("Reverb config: shipping region cleared");
        self.refresh_headers();
        self.refresh_profile();
    }

    /// Sets the locale and re-derives headers and profile.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
        tracing::debug!("Reverb config: locale set to {}", self.locale);
        self.refresh_headers();
        self.refresh_profile();
    }

    /// Sets the base endpoint and re-derives the profile only.
    ///
    /// The header set does not depend on the endpoint and keeps its
    /// identity across this call.
    pub fn set_base_endpoint(&mut self, endpoint: BaseEndpoint) {
        self.base_endpoint = endpoint;
        tracing::debug!("Reverb config: base endpoint set to {}", self.base_endpoint);
        self.refresh_profile();
    }

    fn refresh_headers(&mut self) {
        self.headers = Arc::new(HeaderSet::derive(
            &self.api_key,
            &self.api_version,
            &self.display_currency,
            &self.locale,
            self.shipping_region.as_deref(),
        ));
    }

    fn refresh_profile(&mut self) {
        self.profile = RequestProfile {
            base_endpoint: self.base_endpoint.clone(),
            api_key: self.api_key.clone(),
            headers: Arc::clone(&self.headers),
            api_version: self.api_version.clone(),
            locale: self.locale.clone(),
            display_currency: self.display_currency.clone(),
            shipping_region: self.shipping_region.clone(),
        };
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Builder for constructing [`ReverbConfig`] instances.
///
/// The only required field is `api_key`.
///
/// # Defaults
///
/// - `api_version`: `"3.0"`
/// - `base_endpoint`: `https://api.reverb.com/api`
/// - `display_currency`: `"USD"`
/// - `locale`: `"en"`
/// - `shipping_region`: `None`
///
/// # Example
///
/// ```rust
/// use reverb_api::ReverbConfig;
///
/// let config = ReverbConfig::builder()
///     .api_key("key")
///     .api_version("3.0")
///     .base_endpoint("https://sandbox.reverb.com/api")
///     .display_currency("CAD")
///     .shipping_region("CA")
///     .locale("fr")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.headers().get("X-Shipping-Region"), Some("CA"));
/// ```
#[derive(Debug, Default)]
pub struct ReverbConfigBuilder {
    api_key: Option<String>,
    options: ReverbOptions,
}

impl ReverbConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.options.api_version = Some(version.into());
        self
    }

    /// Sets the base endpoint URL. Validated in [`build`](Self::build).
    #[must_use]
    pub fn base_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.options.base_endpoint = Some(endpoint.into());
        self
    }

    /// Sets the display currency.
    #[must_use]
    pub fn display_currency(mut self, currency: impl Into<String>) -> Self {
        self.options.display_currency = Some(currency.into());
        self
    }

    /// Sets the shipping region.
    #[must_use]
    pub fn shipping_region(mut self, region: impl Into<String>) -> Self {
        self.options.shipping_region = Some(region.into());
        self
    }

    /// Sets the locale.
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.options.locale = Some(locale.into());
        self
    }

    /// Builds the [`ReverbConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` was never
    /// set, and otherwise the errors of [`ReverbConfig::new`].
    pub fn build(self) -> Result<ReverbConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        ReverbConfig::new(ReverbOptions {
            api_key,
            ..self.options
        })
    }
}
