//! Error types for the Reverb API SDK.
//!
//! This module contains the configuration error raised when a client is
//! constructed, and the crate-level [`ReverbError`] returned by the endpoint
//! wrappers.
//!
//! # Error Handling
//!
//! Configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Endpoint wrappers return `Result<T, ReverbError>`,
//! which wraps transport failures untouched.
//!
//! # Example
//!
//! ```rust
//! use reverb_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

use crate::clients::HttpError;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message. Configuration
/// errors are fatal to construction: supply corrected input and build again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Reverb API key.")]
    EmptyApiKey,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Base endpoint is not a domain-rooted URL.
    #[error("Invalid base endpoint '{url}'. Please provide a URL with scheme and domain (e.g., 'https://api.reverb.com/api').")]
    InvalidBaseEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },
}

/// Errors returned by the client and resource wrappers.
#[derive(Debug, Error)]
pub enum ReverbError {
    /// The configuration could not be built.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The transport failed or returned a non-successful status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response body did not match the expected shape.
    #[error("Failed to deserialize response body: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// A request path was empty.
    #[error("Invalid request path: '{path}'")]
    InvalidPath {
        /// The invalid path that was provided.
        path: String,
    },
}
