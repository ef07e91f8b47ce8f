//! URL and query-string building.
//!
//! These helpers are shared by the reqwest transport and by the endpoint
//! wrappers. They are pure string functions with no I/O.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use reverb_api::rest::{build_url, build_url_with_query};
//! use serde_json::json;
//!
//! let url = build_url("https://api.reverb.com/api/", "my/listings");
//! assert_eq!(url, "https://api.reverb.com/api/my/listings");
//!
//! let mut params = BTreeMap::new();
//! params.insert("query".to_string(), json!("les paul"));
//! params.insert("state".to_string(), json!(null));
//!
//! assert_eq!(
//!     build_url_with_query(&url, &params),
//!     "https://api.reverb.com/api/my/listings?query=les%20paul"
//! );
//! ```

use std::collections::BTreeMap;
use std::fmt::Display;

use serde_json::Value;

/// Returns `true` if `path` is an absolute `http://` or `https://` URL.
#[must_use]
pub fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Joins `path` to `base` with exactly one slash between them.
///
/// Absolute URLs are returned unchanged.
#[must_use]
pub fn build_url(base: &str, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }

    let base = base.strip_suffix('/').unwrap_or(base);
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Renders a parameter value the way it appears in a query string.
///
/// Strings are used as-is, arrays are comma-joined, everything else uses
/// its JSON text. `null` has no rendering.
fn param_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(param_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

/// Builds a percent-encoded query string without the leading `?`.
///
/// Entries whose value is `null` are skipped. Keys appear in sorted order.
#[must_use]
pub fn build_query_string(params: &BTreeMap<String, Value>) -> String {
    params
        .iter()
        .filter_map(|(key, value)| {
            param_value(value).map(|v| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(&v))
            })
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Appends `params` to `url` as a query string.
///
/// Returns `url` unchanged when no parameter survives the `null` filter.
/// If `url` already has a query, the new parameters are appended with `&`.
#[must_use]
pub fn build_url_with_query(url: &str, params: &BTreeMap<String, Value>) -> String {
    let query = build_query_string(params);
    if query.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

/// Interpolates `{name}` placeholders in `template`.
///
/// Values are percent-encoded. Placeholders without a value are left as-is.
///
/// # Example
///
/// ```rust
/// use reverb_api::rest::build_path;
///
/// assert_eq!(build_path("listings/{id}", &[("id", 42)]), "listings/42");
/// ```
#[must_use]
pub fn build_path<V: Display>(template: &str, ids: &[(&str, V)]) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &urlencoding::encode(&value.to_string()));
    }

    result
}
