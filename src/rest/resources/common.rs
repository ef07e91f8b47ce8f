//! Types shared by several Reverb resources.
//!
//! Reverb is a HAL API: most payloads carry a `_links` object whose entries
//! are [`Link`]s, and list endpoints wrap their items in a
//! [`PaginatedReverbResponse`].

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

/// A HAL link.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Link {
    /// Absolute URL of the linked resource.
    pub href: String,

    /// HTTP method to use, when it is not GET.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// A resource identifier.
///
/// Reverb returns some identifiers as JSON numbers and others as strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ReverbId {
    /// Numeric identifier.
    Number(u64),
    /// String identifier.
    Text(String),
}

impl fmt::Display for ReverbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ReverbId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ReverbId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ReverbId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A price as rendered by Reverb.
///
/// `amount` stays a string to keep the decimal representation intact.
///
/// # Example
///
/// ```rust
/// use reverb_api::rest::resources::Price;
///
/// let price: Price = serde_json::from_str(
///     r#"{"amount":"1299.00","amount_cents":129900,"currency":"USD","symbol":"$","display":"$1,299"}"#,
/// )
/// .unwrap();
/// assert_eq!(price.amount_cents, Some(129_900));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Price {
    /// Decimal amount, e.g. `"1299.00"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    /// Amount in the currency's minor unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_cents: Option<i64>,

    /// ISO 4217 currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Currency symbol, e.g. `"$"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    /// Formatted amount for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// Tax note shown next to the price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_included_hint: Option<String>,

    /// Whether the amount includes tax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_included: Option<bool>,

    /// Tax rate included in the amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_included_rate: Option<f64>,
}

/// An amount and currency as sent when creating resources.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MoneyInput {
    /// Decimal amount in `XX.XX` format.
    pub amount: String,
    /// ISO 4217 currency code (USD, GBP, EUR, ...).
    pub currency: String,
}

/// Links of a photo.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PhotoLinks {
    /// Large cropped image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_crop: Option<Link>,
    /// Small cropped image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_crop: Option<Link>,
    /// Full-size image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full: Option<Link>,
    /// Thumbnail image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Link>,
}

/// A photo attached to a listing or order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Photo {
    /// Image links by size.
    #[serde(rename = "_links", default)]
    pub links: PhotoLinks,
}

/// Navigation links of a paginated response.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PaginationLinks {
    /// Next page, absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Link>,

    /// Previous page, absent on the first page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<Link>,
}

/// A paginated list payload.
///
/// The endpoint-specific body (e.g. `{"listings": [...]}`) is flattened into
/// `data`; the pagination fields sit next to it. Derefs to `T`.
///
/// # Example
///
/// ```rust
/// use reverb_api::rest::resources::{ListingsPage, PaginatedReverbResponse};
///
/// let page: PaginatedReverbResponse<ListingsPage> = serde_json::from_str(
///     r#"{"listings":[],"total":0,"current_page":1,"total_pages":0,"_links":{}}"#,
/// )
/// .unwrap();
///
/// assert!(page.listings.is_empty());
/// assert!(!page.has_next_page());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PaginatedReverbResponse<T> {
    /// The endpoint-specific body.
    #[serde(flatten)]
    pub data: T,

    /// Total number of items across all pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    /// Page number of this response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,

    /// Total number of pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,

    /// Links to neighbouring pages.
    #[serde(rename = "_links", default)]
    pub links: PaginationLinks,
}

impl<T> PaginatedReverbResponse<T> {
    /// Returns `true` if the response links to a next page.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.links.next.is_some()
    }

    /// Returns `true` if the response links to a previous page.
    #[must_use]
    pub const fn has_prev_page(&self) -> bool {
        self.links.prev.is_some()
    }

    /// Consumes the response and returns the endpoint-specific body.
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T> Deref for PaginatedReverbResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for PaginatedReverbResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}
