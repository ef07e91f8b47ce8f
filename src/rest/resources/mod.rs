//! Reverb REST resources.
//!
//! Each resource is a plain serde struct with associated async functions
//! that take a [`ReverbClient`](crate::ReverbClient).
//!
//! # Available Resources
//!
//! ## Listing
//!
//! ```rust,ignore
//! use reverb_api::rest::resources::{Listing, MyListingsParams};
//!
//! let listing = Listing::find(&client, 7134522).await?;
//! println!("{:?}", listing.data.title);
//!
//! let page = Listing::mine(&client, &MyListingsParams::default()).await?;
//! println!("{} of {:?}", page.data.listings.len(), page.data.total);
//! ```
//!
//! ## Order
//!
//! ```rust,ignore
//! use reverb_api::rest::resources::Order;
//!
//! let orders = Order::all_my_selling(&client, 50).await?;
//! ```

#![warn(missing_docs)]

mod common;
mod listing;
mod order;

pub use common::{
    Link, MoneyInput, PaginatedReverbResponse, PaginationLinks, Photo, PhotoLinks, Price,
    ReverbId,
};
pub use listing::{
    AllMyListingsParams, Category, CategoryRef, ConditionRef, Listing, ListingCondition,
    ListingLinks, ListingPostBody, ListingShipping, ListingShippingInput, ListingState,
    ListingStats, ListingsPage, MyListingsParams, ShippingRate, ShippingRateInput, VideoRef,
    ALL_MY_LISTINGS_PAGE_SIZE,
};
pub use order::{
    ContactBuyerLinks, MyOrdersParams, Order, OrderLinks, OrdersPage, ShippingAddress,
    ShippingAddressLinks,
};
