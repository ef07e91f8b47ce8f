//! HTTP client types for Reverb API communication.
//!
//! This module provides the transport layer: the [`HttpClient`] trait that
//! endpoint wrappers depend on, a production implementation on `reqwest`, an
//! in-memory test double, and the [`ReverbClient`] that ties a
//! [`ReverbConfig`](crate::ReverbConfig) to a transport.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The injected, verb-based transport capability
//! - [`ReqwestHttpClient`]: The default transport
//! - [`MockHttpClient`]: A recording test double that fails loudly on unmatched requests
//! - [`HttpRequestConfig`]: Per-request headers, params, timeout and passthrough options
//! - [`HttpResponse`]: The response envelope
//! - [`HttpError`]: The transport error
//! - [`ReverbClient`]: Configuration plus transport, with thin verb helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use reverb_api::{ReverbClient, ReverbConfig};
//!
//! let config = ReverbConfig::builder().api_key("my-api-key").build()?;
//! let client = ReverbClient::new(config)?;
//!
//! let root = client.get_root().await?;
//! println!("{}", root.data);
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod mock;
pub mod rest;

pub use errors::HttpError;
pub use http_client::{HttpClient, ReqwestHttpClient};
pub use http_request::{HttpMethod, HttpRequestConfig, MAX_REDIRECTS};
pub use http_response::HttpResponse;
pub use mock::{
    create_mock_error, create_mock_response, MockHttpClient, MockReply, MockResponse,
    RecordedRequest, RequestMatcher, ResponseGenerator,
};

pub use rest::{GetArbitraryEndpointOptions, ReverbClient};
