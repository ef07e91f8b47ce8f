//! REST API client for the Reverb marketplace.
//!
//! This module provides [`ReverbClient`], the higher-level client built on an
//! injected [`HttpClient`](crate::clients::HttpClient). Resource wrappers in
//! [`crate::rest::resources`] are written against it.
//!
//! # Example
//!
//! ```rust,ignore
//! use reverb_api::{ReverbClient, ReverbConfig};
//! use reverb_api::clients::{GetArbitraryEndpointOptions, HttpRequestConfig};
//!
//! let config = ReverbConfig::from_env()?;
//! let client = ReverbClient::new(config)?;
//!
//! // GET request relative to the base endpoint
//! let response = client.get("my/account", HttpRequestConfig::new()).await?;
//!
//! // Follow a HAL link returned by a previous response
//! let href = response.data["_links"]["listings"]["href"].as_str().unwrap();
//! let listings = client
//!     .get_arbitrary_endpoint(GetArbitraryEndpointOptions::new(href))
//!     .await?;
//! ```

mod client;

pub use client::{GetArbitraryEndpointOptions, ReverbClient};
