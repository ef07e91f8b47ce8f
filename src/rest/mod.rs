//! REST helpers and resources for the Reverb API.
//!
//! This module provides:
//!
//! - **URL building**: [`build_url`], [`build_query_string`],
//!   [`build_url_with_query`] and [`build_path`]
//! - **Pagination**: [`paginate_all`] and [`create_paginated_result`], a
//!   page-number driver independent of any particular endpoint
//! - **Resources**: typed endpoint wrappers in [`resources`]
//!
//! # Example: Paginating a Custom Endpoint
//!
//! ```rust,ignore
//! use reverb_api::clients::HttpRequestConfig;
//! use reverb_api::rest::{create_paginated_result, paginate_all, PaginationOptions};
//!
//! let feedback = paginate_all(
//!     |page, per_page| {
//!         let client = &client;
//!         async move {
//!             let response = client
//!                 .get(
//!                     "my/feedback",
//!                     HttpRequestConfig::new().param("page", page).param("per_page", per_page),
//!                 )
//!                 .await?;
//!             let items = response.data["feedbacks"].as_array().cloned().unwrap_or_default();
//!             Ok::<_, reverb_api::ReverbError>(create_paginated_result(items, per_page, page))
//!         }
//!     },
//!     PaginationOptions::new().page_size(25).max_pages(10),
//! )
//! .await?;
//! ```

mod pagination;
mod path;
pub mod resources;

pub use pagination::{
    create_paginated_result, paginate_all, PaginatedFetchResult, PaginationOptions,
    DEFAULT_PAGE_SIZE, DEFAULT_START_PAGE,
};
pub use path::{build_path, build_query_string, build_url, build_url_with_query, is_absolute_url};
