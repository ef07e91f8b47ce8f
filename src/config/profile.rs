//! Request profile snapshots.

use std::sync::Arc;

use crate::config::{ApiKey, BaseEndpoint, HeaderSet};

/// A snapshot of everything an endpoint wrapper needs to build a request.
///
/// Wrappers read a `RequestProfile` instead of holding on to the whole
/// [`ReverbConfig`](crate::ReverbConfig). The header set is shared with the
/// configuration through an `Arc`, so a profile refreshed by an endpoint
/// change still points at the very same [`HeaderSet`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestProfile {
    /// Base endpoint all relative paths are joined to.
    pub base_endpoint: BaseEndpoint,
    /// The API key used for authorization.
    pub api_key: ApiKey,
    /// Headers to send with every request.
    pub headers: Arc<HeaderSet>,
    /// API version (`Accept-Version`).
    pub api_version: String,
    /// Locale (`Accept-Language`).
    pub locale: String,
    /// Display currency (`X-Display-Currency`).
    pub display_currency: String,
    /// Shipping region (`X-Shipping-Region`), if any.
    pub shipping_region: Option<String>,
}

impl RequestProfile {
    /// Joins `path` to the base endpoint.
    ///
    /// See [`build_url`](crate::rest::build_url) for the joining rules.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        crate::rest::build_url(self.base_endpoint.as_ref(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_url_joins_relative_paths() {
        let api_key = ApiKey::new("key").unwrap();
        let profile = RequestProfile {
            base_endpoint: BaseEndpoint::default(),
            headers: Arc::new(HeaderSet::derive(&api_key, "3.0", "USD", "en", None)),
            api_key,
            api_version: "3.0".to_string(),
            locale: "en".to_string(),
            display_currency: "USD".to_string(),
            shipping_region: None,
        };

        assert_eq!(
            profile.url("my/listings"),
            "https://api.reverb.com/api/my/listings"
        );
        assert_eq!(
            profile.url("https://example.com/abs"),
            "https://example.com/abs"
        );
    }
}
