//! # Reverb API Rust SDK
//!
//! A Rust SDK for the Reverb marketplace REST API, providing type-safe
//! configuration, deterministic request-header derivation, an injectable
//! HTTP transport, and a generic page-number pagination driver.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Client configuration via [`ReverbConfig`] and [`ReverbConfigBuilder`]
//! - Validated newtypes for the API key and base endpoint
//! - A [`HeaderSet`] always derived from the current configuration
//! - A [`RequestProfile`] snapshot used to build each request
//! - An object-safe [`HttpClient`] transport with a reqwest implementation
//!   and a recording mock
//! - [`paginate_all`](rest::paginate_all) for draining paginated endpoints
//! - Typed Listing and Order endpoints in [`rest::resources`]
//!
//! ## Quick Start
//!
//! ```rust
//! use reverb_api::ReverbConfig;
//!
//! let config = ReverbConfig::builder()
//!     .api_key("your-api-key")
//!     .display_currency("EUR")
//!     .locale("de")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.headers().get("Authorization"), Some("Bearer your-api-key"));
//! assert_eq!(config.headers().get("X-Display-Currency"), Some("EUR"));
//! assert!(!config.headers().contains("X-Shipping-Region"));
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use reverb_api::{ReverbClient, ReverbConfig};
//! use reverb_api::rest::resources::{AllMyListingsParams, Listing};
//!
//! let config = ReverbConfig::from_env()?;
//! let client = ReverbClient::new(config)?;
//!
//! let listings = Listing::all_mine(&client, &AllMyListingsParams {
//!     state: Some("live".to_string()),
//!     ..Default::default()
//! })
//! .await?;
//! println!("{} live listings", listings.len());
//! ```
//!
//! ## Changing Settings at Runtime
//!
//! Setters re-derive the headers and the request profile immediately:
//!
//! ```rust
//! use reverb_api::ReverbConfig;
//!
//! let mut config = ReverbConfig::builder().api_key("key").build().unwrap();
//!
//! config.set_shipping_region("US_CON");
//! assert_eq!(config.request_profile().headers.get("X-Shipping-Region"), Some("US_CON"));
//!
//! config.clear_shipping_region();
//! assert!(!config.headers().contains("X-Shipping-Region"));
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Logging through `tracing`**: The library never installs a subscriber

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{
    ApiKey, BaseEndpoint, HeaderSet, RequestProfile, ReverbConfig, ReverbConfigBuilder,
    ReverbOptions,
};
pub use error::{ConfigError, ReverbError};

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequestConfig, HttpResponse, MockHttpClient,
    ReqwestHttpClient, ReverbClient,
};
