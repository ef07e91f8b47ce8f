//! Integration tests for client configuration and header derivation.
//!
//! These tests exercise the public configuration API end to end: building
//! from options, runtime setters, and the derived headers and request
//! profile.

use std::sync::Arc;

use reverb_api::config::{header_names, HAL_JSON, USER_AGENT};
use reverb_api::{BaseEndpoint, ConfigError, HeaderSet, ReverbConfig, ReverbOptions};

fn options(api_key: &str) -> ReverbOptions {
    ReverbOptions {
        api_key: api_key.to_string(),
        ..Default::default()
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_any_non_empty_key_builds_with_defaults() {
    for key in ["a", "abc123", "key with spaces", "🎸"] {
        let config = ReverbConfig::new(options(key)).unwrap();

        assert_eq!(config.api_key().as_ref(), key);
        assert_eq!(config.api_version(), "3.0");
        assert_eq!(config.display_currency(), "USD");
        assert_eq!(config.locale(), "en");
        assert_eq!(config.shipping_region(), None);
        assert_eq!(config.base_endpoint().as_ref(), "https://api.reverb.com/api");
    }
}

#[test]
fn test_empty_or_missing_key_fails() {
    assert_eq!(
        ReverbConfig::new(options("")).unwrap_err(),
        ConfigError::EmptyApiKey
    );
    assert_eq!(
        ReverbConfig::builder().locale("en").build().unwrap_err(),
        ConfigError::MissingRequiredField { field: "api_key" }
    );
}

#[test]
fn test_invalid_base_endpoint_fails() {
    let result = ReverbConfig::builder()
        .api_key("key")
        .base_endpoint("reverb")
        .build();

    assert!(matches!(
        result,
        Err(ConfigError::InvalidBaseEndpoint { .. })
    ));
}

#[test]
fn test_empty_optional_values_fall_back_to_defaults() {
    let config = ReverbConfig::new(ReverbOptions {
        api_key: "key".to_string(),
        api_version: Some(String::new()),
        base_endpoint: Some(String::new()),
        display_currency: Some(String::new()),
        shipping_region: Some(String::new()),
        locale: Some(String::new()),
    })
    .unwrap();

    assert_eq!(config.api_version(), "3.0");
    assert_eq!(config.display_currency(), "USD");
    assert_eq!(config.locale(), "en");
    assert_eq!(config.shipping_region(), None);
    assert_eq!(config.base_endpoint(), &BaseEndpoint::default());
}

#[test]
fn test_options_from_camel_case_json() {
    let options: ReverbOptions = serde_json::from_str(
        r#"{
            "apiKey": "json-key",
            "version": "3.0",
            "rootEndpoint": "https://sandbox.reverb.com/api",
            "displayCurrency": "CAD",
            "shippingRegion": "CA",
            "locale": "fr"
        }"#,
    )
    .unwrap();

    let config = ReverbConfig::new(options).unwrap();

    assert_eq!(config.base_endpoint().host_name(), "sandbox.reverb.com");
    assert_eq!(config.headers().get("X-Display-Currency"), Some("CAD"));
    assert_eq!(config.headers().get("X-Shipping-Region"), Some("CA"));
    assert_eq!(config.headers().get("Accept-Language"), Some("fr"));
}

// ============================================================================
// Header derivation
// ============================================================================

#[test]
fn test_initial_headers_match_fresh_derivation() {
    let config = ReverbConfig::builder()
        .api_key("secret")
        .shipping_region("US_CON")
        .build()
        .unwrap();

    let fresh = HeaderSet::derive(config.api_key(), "3.0", "USD", "en", Some("US_CON"));
    assert_eq!(config.headers(), &fresh);

    assert_eq!(config.headers().get(header_names::CONTENT_TYPE), Some(HAL_JSON));
    assert_eq!(config.headers().get(header_names::ACCEPT), Some(HAL_JSON));
    assert_eq!(config.headers().get(header_names::USER_AGENT), Some(USER_AGENT));
    assert_eq!(
        config.headers().get(header_names::AUTHORIZATION),
        Some("Bearer secret")
    );
    assert_eq!(config.headers().len(), 8);
}

#[test]
fn test_region_header_absent_until_set() {
    let mut config = ReverbConfig::new(options("key")).unwrap();
    assert!(!config.headers().contains("X-Shipping-Region"));
    assert_eq!(config.headers().len(), 7);

    config.set_shipping_region("EUR_EU");
    assert_eq!(config.headers().get("X-Shipping-Region"), Some("EUR_EU"));

    config.set_shipping_region("");
    assert!(!config.headers().contains("X-Shipping-Region"));
    assert_eq!(config.shipping_region(), None);
}

#[test]
fn test_setters_update_headers_and_profile() {
    let mut config = ReverbConfig::new(options("key")).unwrap();

    config.set_version("3.2");
    config.set_display_currency("JPY");
    config.set_locale("ja");
    config.set_shipping_region("JP");

    for headers in [config.headers(), config.request_profile().headers.as_ref()] {
        assert_eq!(headers.get("Accept-Version"), Some("3.2"));
        assert_eq!(headers.get("X-Display-Currency"), Some("JPY"));
        assert_eq!(headers.get("Accept-Language"), Some("ja"));
        assert_eq!(headers.get("X-Shipping-Region"), Some("JP"));
        assert_eq!(headers.get("Authorization"), Some("Bearer key"));
    }

    let profile = config.request_profile();
    assert_eq!(profile.api_version, "3.2");
    assert_eq!(profile.display_currency, "JPY");
    assert_eq!(profile.locale, "ja");
    assert_eq!(profile.shipping_region.as_deref(), Some("JP"));

    let fresh = HeaderSet::derive(config.api_key(), "3.2", "JPY", "ja", Some("JP"));
    assert_eq!(config.headers(), &fresh);
}

#[test]
fn test_setters_do_not_validate_values() {
    let mut config = ReverbConfig::new(options("key")).unwrap();
    config.set_display_currency("not-a-currency");
    config.set_version("");

    assert_eq!(config.headers().get("X-Display-Currency"), Some("not-a-currency"));
    assert_eq!(config.headers().get("Accept-Version"), Some(""));
}

// ============================================================================
// Endpoint changes
// ============================================================================

#[test]
fn test_endpoint_change_keeps_header_identity() {
    let mut config = ReverbConfig::new(options("key")).unwrap();
    let headers_before = config.shared_headers();

    config.set_base_endpoint(BaseEndpoint::new("https://sandbox.reverb.com/api").unwrap());

    assert!(Arc::ptr_eq(&headers_before, &config.shared_headers()));
    assert!(Arc::ptr_eq(
        &headers_before,
        &config.request_profile().headers
    ));
    assert_eq!(
        config.request_profile().base_endpoint.as_ref(),
        "https://sandbox.reverb.com/api"
    );
    assert_eq!(
        config.request_profile().url("my/listings"),
        "https://sandbox.reverb.com/api/my/listings"
    );
}

#[test]
fn test_header_setter_replaces_header_identity() {
    let mut config = ReverbConfig::new(options("key")).unwrap();
    let headers_before = config.shared_headers();

    config.set_locale("de");

    assert!(!Arc::ptr_eq(&headers_before, &config.shared_headers()));
    assert_eq!(headers_before.get("Accept-Language"), Some("en"));
}

#[test]
fn test_debug_output_masks_api_key() {
    let config = ReverbConfig::new(options("super-secret-key")).unwrap();
    let debug = format!("{config:?}");

    assert!(!debug.contains("super-secret-key"));
}
