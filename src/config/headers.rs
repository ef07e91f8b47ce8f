//! Header derivation for outbound requests.
//!
//! [`HeaderSet`] is the immutable mapping of header names to values sent with
//! every request. It is always produced by [`HeaderSet::derive`], a pure
//! function of the configuration fields and the fixed defaults below.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::ApiKey;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed client identifier sent as `User-Agent`.
pub const USER_AGENT: &str = concat!("Reverb Rust SDK v", env!("CARGO_PKG_VERSION"));

/// Media type used for both `Content-Type` and `Accept`.
pub const HAL_JSON: &str = "application/hal+json";

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "3.0";

/// Default display currency.
pub const DEFAULT_DISPLAY_CURRENCY: &str = "USD";

/// Default locale.
pub const DEFAULT_LOCALE: &str = "en";

/// Header names used by the SDK.
pub mod names {
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const ACCEPT_VERSION: &str = "Accept-Version";
    pub const ACCEPT: &str = "Accept";
    pub const ACCEPT_LANGUAGE: &str = "Accept-Language";
    pub const DISPLAY_CURRENCY: &str = "X-Display-Currency";
    pub const SHIPPING_REGION: &str = "X-Shipping-Region";
    pub const USER_AGENT: &str = "User-Agent";
    pub const AUTHORIZATION: &str = "Authorization";
}

/// The derived set of headers sent with every request.
///
/// Keys are kept in a `BTreeMap` so iteration order is deterministic. The
/// `Debug` output masks the `Authorization` value.
///
/// # Example
///
/// ```rust
/// use reverb_api::{ApiKey, HeaderSet};
///
/// let key = ApiKey::new("abc").unwrap();
/// let headers = HeaderSet::derive(&key, "3.0", "USD", "en", None);
/// assert_eq!(headers.get("Authorization"), Some("Bearer abc"));
/// assert!(!headers.contains("X-Shipping-Region"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HeaderSet(BTreeMap<String, String>);

impl HeaderSet {
    /// Returns the fixed default headers, before any configuration overlay.
    #[must_use]
    pub fn defaults() -> Self {
        let mut map = BTreeMap::new();
        map.insert(names::CONTENT_TYPE.to_string(), HAL_JSON.to_string());
        map.insert(
            names::ACCEPT_VERSION.to_string(),
            DEFAULT_API_VERSION.to_string(),
        );
        map.insert(names::ACCEPT.to_string(), HAL_JSON.to_string());
        map.insert(
            names::ACCEPT_LANGUAGE.to_string(),
            DEFAULT_LOCALE.to_string(),
        );
        map.insert(
            names::DISPLAY_CURRENCY.to_string(),
            DEFAULT_DISPLAY_CURRENCY.to_string(),
        );
        map.insert(names::USER_AGENT.to_string(), USER_AGENT.to_string());
        Self(map)
    }

    /// Derives the header set from configuration values.
    ///
    /// Starts from [`HeaderSet::defaults`] and overlays authorization,
    /// version, currency and locale. `X-Shipping-Region` is only inserted
    /// for a present, non-empty region.
    #[must_use]
    pub fn derive(
        api_key: &ApiKey,
        api_version: &str,
        display_currency: &str,
        locale: &str,
        shipping_region: Option<&str>,
    ) -> Self {
        let mut headers = Self::defaults();
        headers.insert(names::AUTHORIZATION, api_key.bearer());
        headers.insert(names::ACCEPT_VERSION, api_version);
        headers.insert(names::DISPLAY_CURRENCY, display_currency);
        headers.insert(names::ACCEPT_LANGUAGE, locale);

        if let Some(region) = shipping_region.filter(|r| !r.is_empty()) {
            headers.insert(names::SHIPPING_REGION, region);
        }

        headers
    }

    fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }

    /// Returns the value of a header, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns `true` if the header key is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copies the headers into an owned map, e.g. for a request config.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.0.clone()
    }
}

impl fmt::Debug for HeaderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(name, value)| {
                if name == names::AUTHORIZATION {
                    (name, "Bearer *****")
                } else {
                    (name, value)
                }
            }))
            .finish()
    }
}
