//! Listing resource.
//!
//! This module provides the [`Listing`] resource and its endpoints:
//!
//! - [`Listing::find`] - `GET /listings/{id}`
//! - [`Listing::mine`] - `GET /my/listings`, one page
//! - [`Listing::all_mine`] - every page of `/my/listings`
//! - [`Listing::create`] - `POST /listings`
//!
//! # Example
//!
//! ```rust,ignore
//! use reverb_api::rest::resources::{AllMyListingsParams, Listing, MyListingsParams};
//!
//! let page = Listing::mine(&client, &MyListingsParams {
//!     page: Some(2),
//!     per_page: Some(25),
//!     state: Some("live".to_string()),
//!     ..Default::default()
//! })
//! .await?;
//! for listing in &page.data.listings {
//!     println!("{}", listing.title.as_deref().unwrap_or(""));
//! }
//!
//! let everything = Listing::all_mine(&client, &AllMyListingsParams::default()).await?;
//! println!("{} listings", everything.len());
//! ```

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpRequestConfig, HttpResponse, ReverbClient};
use crate::error::ReverbError;
use crate::rest::{build_path, create_paginated_result, paginate_all, PaginationOptions};

use super::common::{Link, MoneyInput, PaginatedReverbResponse, Photo, Price, ReverbId};

/// Page size used by [`Listing::all_mine`].
pub const ALL_MY_LISTINGS_PAGE_SIZE: u32 = 50;

/// Listing state, e.g. `live`, `sold`, `draft`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ListingState {
    /// State slug, e.g. `live`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Human-readable state name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// View and watch counts of a listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ListingStats {
    /// Number of views.
    #[serde(default)]
    pub views: u64,
    /// Number of users watching the listing.
    #[serde(default)]
    pub watches: u64,
}

/// Item condition (`Excellent`, `Very Good`, `B-Stock`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ListingCondition {
    /// Condition UUID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Condition name as shown on the site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// A category reference.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Category {
    /// Category UUID, as listed by `/categories/flat`.
    pub uuid: String,
    /// Full category path, e.g. `Electric Guitars / Solid Body`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// A shipping rate for one region.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShippingRate {
    /// Region the rate applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    /// Shipping price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Price>,
    /// Whether the carrier computes the rate at checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_calculated: Option<bool>,
    /// Whether the rate is a regional one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regional: Option<bool>,
    /// Whether a postal code is needed to quote.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_postal_code_needed: Option<bool>,
}

/// Shipping options of a listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ListingShipping {
    /// Whether local pickup is offered.
    #[serde(default)]
    pub local: bool,
    /// Per-region rates.
    #[serde(default)]
    pub rates: Vec<ShippingRate>,
    /// Rate for the requested shipping region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_region_rate: Option<ShippingRate>,
    /// Rate applied to the first offer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_offer_rate: Option<ShippingRate>,
}

/// HAL links of a listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ListingLinks {
    /// Primary photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Link>,
    /// This listing.
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,
    /// Update endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<Link>,
    /// End-listing endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Link>,
    /// Add to wishlist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub want: Option<Link>,
    /// Remove from wishlist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unwant: Option<Link>,
    /// Seller edit page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<Link>,
    /// Public web page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<Link>,
    /// Offer endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make_offer: Option<Link>,
    /// Add-to-cart endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart: Option<Link>,
}

/// A marketplace listing.
///
/// Every field is optional so that partial payloads (search results,
/// embedded listings) deserialize as well as full ones.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Listing {
    /// Listing ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ReverbId>,

    /// Manufacturer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,

    /// Model name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Finish or color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,

    /// Year or decade, free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    /// Listing title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// When the listing was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the listing went live.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    /// Seller shop name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,

    /// Description, HTML allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Item condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ListingCondition>,

    /// Asking price in the listing currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,

    /// Price converted to the display currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_price: Option<Price>,

    /// Price as the seller entered it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_price: Option<Price>,

    /// Units in stock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<i64>,

    /// Whether the listing tracks inventory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_inventory: Option<bool>,

    /// Whether buyers may make offers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offers_enabled: Option<bool>,

    /// Whether the listing is an auction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auction: Option<bool>,

    /// Categories the listing belongs to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,

    /// ISO currency the listing is priced in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_currency: Option<String>,

    /// Listing state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ListingState>,

    /// Shipping profile, if one is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_profile_id: Option<ReverbId>,

    /// Shipping options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ListingShipping>,

    /// View and watch counts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ListingStats>,

    /// URL slug.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Seller SKU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Photos in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<Photo>,

    /// HAL links.
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<ListingLinks>,
}

/// Body of `/my/listings`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ListingsPage {
    /// Listings on this page.
    #[serde(default)]
    pub listings: Vec<Listing>,
}

/// Query parameters for [`Listing::mine`].
///
/// Unset, empty or zero values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MyListingsParams {
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
    /// Free-text search.
    pub query: Option<String>,
    /// Listing state slug (`live`, `draft`, `sold`, ...).
    pub state: Option<String>,
}

impl MyListingsParams {
    fn to_request_config(&self) -> HttpRequestConfig {
        HttpRequestConfig::new()
            .param_opt("page", self.page.filter(|p| *p > 0))
            .param_opt("per_page", self.per_page.filter(|p| *p > 0))
            .param_opt("query", self.query.as_deref().filter(|q| !q.is_empty()))
            .param_opt("state", self.state.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Filters for [`Listing::all_mine`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllMyListingsParams {
    /// Free-text search.
    pub query: Option<String>,
    /// Listing state slug.
    pub state: Option<String>,
}

/// A category reference in a [`ListingPostBody`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CategoryRef {
    /// UUID from `/categories/flat`.
    pub uuid: String,
}

/// A condition reference in a [`ListingPostBody`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConditionRef {
    /// UUID from `/listing_conditions`.
    pub uuid: String,
}

/// A video reference in a [`ListingPostBody`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct VideoRef {
    /// Video URL.
    pub link: String,
}

/// One explicit shipping rate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShippingRateInput {
    /// Shipping price.
    pub rate: MoneyInput,
    /// Region code, e.g. `US_CON` or `XX` for everywhere else.
    pub region_code: String,
}

/// Explicit shipping rates, used instead of a shipping profile.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ListingShippingInput {
    /// Per-region rates.
    pub rates: Vec<ShippingRateInput>,
    /// Whether local pickup is offered.
    pub local: bool,
}

/// Body for [`Listing::create`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ListingPostBody {
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Category references.
    pub categories: Vec<CategoryRef>,
    /// Condition reference.
    pub condition: ConditionRef,
    /// Photo URLs.
    pub photos: Vec<String>,
    /// Video links.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<VideoRef>,
    /// Description, HTML allowed.
    pub description: String,
    /// Finish or color.
    pub finish: String,
    /// Asking price.
    pub price: MoneyInput,
    /// Listing title.
    pub title: String,
    /// Year or decade, free text.
    pub year: String,
    /// Seller SKU.
    pub sku: String,
    /// UPC or EAN.
    pub upc: String,
    /// Set when the item has no UPC. Sent as the string `"true"`/`"false"`.
    #[serde(with = "bool_string")]
    pub upc_does_not_apply: bool,
    /// Whether to track inventory.
    pub has_inventory: bool,
    /// Units in stock.
    pub inventory: u32,
    /// Whether buyers may make offers.
    pub offers_enabled: bool,
    /// Whether the item is handmade.
    pub handmade: bool,
    /// Shipping profile to use instead of explicit rates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_profile_id: Option<String>,
    /// Explicit shipping rates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ListingShippingInput>,
}

mod bool_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum BoolOrString {
            Bool(bool),
            Text(String),
        }

        match BoolOrString::deserialize(deserializer)? {
            BoolOrString::Bool(b) => Ok(b),
            BoolOrString::Text(s) => match s.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(de::Error::invalid_value(
                    de::Unexpected::Str(other),
                    &"\"true\" or \"false\"",
                )),
            },
        }
    }
}

impl Listing {
    /// Retrieves a single listing.
    ///
    /// # Errors
    ///
    /// Returns [`ReverbError::Http`] on transport failure and
    /// [`ReverbError::Deserialize`] if the body is not a listing.
    pub async fn find(
        client: &ReverbClient,
        id: impl Display + Send,
    ) -> Result<HttpResponse<Self>, ReverbError> {
        let path = build_path("listings/{id}", &[("id", id)]);
        let response = client.get(&path, HttpRequestConfig::new()).await?;
        Ok(response.json()?)
    }

    /// Retrieves one page of the authenticated seller's listings.
    ///
    /// # Errors
    ///
    /// Same as [`Listing::find`].
    pub async fn mine(
        client: &ReverbClient,
        params: &MyListingsParams,
    ) -> Result<HttpResponse<PaginatedReverbResponse<ListingsPage>>, ReverbError> {
        let response = client
            .get("my/listings", params.to_request_config())
            .await?;
        Ok(response.json()?)
    }

    /// Retrieves every listing of the authenticated seller, 50 per page.
    ///
    /// # Errors
    ///
    /// Returns the first page error; listings fetched before it are dropped.
    pub async fn all_mine(
        client: &ReverbClient,
        params: &AllMyListingsParams,
    ) -> Result<Vec<Self>, ReverbError> {
        paginate_all(
            |page, page_size| {
                let page_params = MyListingsParams {
                    page: Some(page),
                    per_page: Some(page_size),
                    query: params.query.clone(),
                    state: params.state.clone(),
                };
                async move {
                    let response = Self::mine(client, &page_params).await?;
                    let listings = response.data.into_inner().listings;
                    Ok::<_, ReverbError>(create_paginated_result(listings, page_size, page))
                }
            },
            PaginationOptions::new().page_size(ALL_MY_LISTINGS_PAGE_SIZE),
        )
        .await
    }

    /// Creates a listing.
    ///
    /// # Errors
    ///
    /// Same as [`Listing::find`].
    pub async fn create(
        client: &ReverbClient,
        body: &ListingPostBody,
    ) -> Result<HttpResponse<Self>, ReverbError> {
        let body = serde_json::to_value(body)?;
        let response = client
            .post("listings", body, HttpRequestConfig::new())
            .await?;
        Ok(response.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_deserializes_reverb_payload() {
        let listing: Listing = serde_json::from_value(json!({
            "id": 7_134_522,
            "make": "Fender",
            "model": "Stratocaster",
            "title": "Fender Stratocaster 1979",
            "created_at": "2023-05-14T10:21:33-05:00",
            "condition": {"uuid": "df268ad1", "display_name": "Very Good"},
            "price": {"amount": "1450.00", "amount_cents": 145_000, "currency": "USD", "symbol": "$", "display": "$1,450"},
            "state": {"slug": "live", "description": "Live"},
            "stats": {"views": 10, "watches": 2},
            "photos": [{"_links": {"full": {"href": "https://images.reverb.com/full.jpg"}}}],
            "_links": {"self": {"href": "https://api.reverb.com/api/listings/7134522"}}
        }))
        .unwrap();

        assert_eq!(listing.id, Some(ReverbId::Number(7_134_522)));
        assert_eq!(listing.make.as_deref(), Some("Fender"));
        assert_eq!(
            listing.created_at.unwrap().to_rfc3339(),
            "2023-05-14T15:21:33+00:00"
        );
        assert_eq!(listing.state.unwrap().slug.as_deref(), Some("live"));
        assert_eq!(listing.stats.unwrap().watches, 2);
        assert_eq!(
            listing.photos[0].links.full.as_ref().unwrap().href,
            "https://images.reverb.com/full.jpg"
        );
        assert!(listing.links.unwrap().self_link.is_some());
    }

    #[test]
    fn test_my_listings_params_skip_empty_values() {
        let config = MyListingsParams {
            page: Some(0),
            per_page: Some(25),
            query: Some(String::new()),
            state: Some("live".to_string()),
        }
        .to_request_config();

        assert_eq!(config.params.len(), 2);
        assert_eq!(config.params.get("per_page"), Some(&json!(25)));
        assert_eq!(config.params.get("state"), Some(&json!("live")));
    }

    #[test]
    fn test_post_body_serializes_upc_flag_as_string() {
        let body = ListingPostBody {
            make: "Gibson".to_string(),
            model: "Les Paul".to_string(),
            upc_does_not_apply: true,
            ..Default::default()
        };

        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["upc_does_not_apply"], json!("true"));
        assert!(value.get("shipping").is_none());
        assert!(value.get("videos").is_none());

        let back: ListingPostBody = serde_json::from_value(value).unwrap();
        assert!(back.upc_does_not_apply);
    }
}
