//! Page-number pagination driver.
//!
//! [`paginate_all`] repeatedly calls a caller-supplied page fetcher and
//! accumulates the items until the API signals the last page.
//!
//! # Termination
//!
//! Fetching stops after a page when any of these holds:
//!
//! - the page reports `has_more == false`
//! - the page is empty
//! - the page holds fewer items than `page_size` (this wins over
//!   `has_more == true`)
//! - `max_pages` pages have been fetched
//!
//! A fetch error aborts the loop; the items collected so far are dropped and
//! the error is returned unchanged.
//!
//! # Example
//!
//! ```rust
//! use reverb_api::rest::{create_paginated_result, paginate_all, PaginationOptions};
//!
//! # tokio_test::block_on(async {
//! let pages = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]];
//!
//! let all = paginate_all(
//!     |page, page_size| {
//!         let items = pages[(page - 1) as usize].clone();
//!         async move {
//!             Ok::<_, std::convert::Infallible>(create_paginated_result(items, page_size, page))
//!         }
//!     },
//!     PaginationOptions::new().page_size(3),
//! )
//! .await
//! .unwrap();
//!
//! assert_eq!(all, vec![1, 2, 3, 4, 5, 6, 7]);
//! # });
//! ```

use std::future::Future;

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Default first page number.
pub const DEFAULT_START_PAGE: u32 = 1;

/// Options controlling [`paginate_all`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationOptions {
    /// Items requested per page.
    pub page_size: u32,
    /// First page number to request.
    pub start_page: u32,
    /// Upper bound on fetched pages; `None` means unbounded.
    pub max_pages: Option<u32>,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            start_page: DEFAULT_START_PAGE,
            max_pages: None,
        }
    }
}

impl PaginationOptions {
    /// Creates options with the defaults (50 per page, starting at page 1,
    /// no page limit).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the first page number.
    #[must_use]
    pub const fn start_page(mut self, start_page: u32) -> Self {
        self.start_page = start_page;
        self
    }

    /// Limits the number of fetched pages.
    #[must_use]
    pub const fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}

/// One page of results as seen by the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginatedFetchResult<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Whether the API reports further pages.
    pub has_more: bool,
    /// Page number these items came from.
    pub current_page: u32,
}

/// Builds a [`PaginatedFetchResult`], inferring `has_more` from a full page.
#[must_use]
pub fn create_paginated_result<T>(
    items: Vec<T>,
    page_size: u32,
    current_page: u32,
) -> PaginatedFetchResult<T> {
    let has_more = u32::try_from(items.len()).is_ok_and(|len| len == page_size);
    PaginatedFetchResult {
        items,
        has_more,
        current_page,
    }
}

/// Fetches every page with `fetch_page` and returns all items in order.
///
/// `fetch_page` is called as `fetch_page(page, page_size)` with page numbers
/// increasing by one from `options.start_page`. Calls are strictly
/// sequential.
///
/// # Errors
///
/// Returns the first error produced by `fetch_page`.
pub async fn paginate_all<T, E, F, Fut>(
    mut fetch_page: F,
    options: PaginationOptions,
) -> Result<Vec<T>, E>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<PaginatedFetchResult<T>, E>>,
{
    let PaginationOptions {
        page_size,
        start_page,
        max_pages,
    } = options;
    let max_pages = max_pages.unwrap_or(u32::MAX);
    // usize::MAX keeps a page_size that does not fit usize from ever
    // counting as a short page
    let page_len = usize::try_from(page_size).unwrap_or(usize::MAX);

    let mut all_items = Vec::new();
    let mut current_page = start_page;
    let mut pages_processed = 0_u32;

    while pages_processed < max_pages {
        let result = fetch_page(current_page, page_size).await?;
        let fetched = result.items.len();
        all_items.extend(result.items);

        tracing::debug!(
            "Fetched page {} ({} items, has_more: {}, total so far: {})",
            current_page,
            fetched,
            result.has_more,
            all_items.len()
        );

        if !result.has_more || fetched == 0 || fetched < page_len {
            break;
        }

        current_page = current_page.saturating_add(1);
        pages_processed += 1;
    }

    Ok(all_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::convert::Infallible;

    #[test]
    fn test_default_options() {
        let options = PaginationOptions::default();
        assert_eq!(options.page_size, 50);
        assert_eq!(options.start_page, 1);
        assert_eq!(options.max_pages, None);
    }

    #[test]
    fn test_create_paginated_result_full_page_has_more() {
        let result = create_paginated_result(vec![1, 2, 3], 3, 4);
        assert!(result.has_more);
        assert_eq!(result.current_page, 4);

        let short = create_paginated_result(vec![1, 2], 3, 5);
        assert!(!short.has_more);
    }

    #[test]
    fn test_stops_when_has_more_false() {
        let calls = RefCell::new(Vec::new());

        let items = tokio_test::block_on(paginate_all(
            |page, _| {
                calls.borrow_mut().push(page);
                async move {
                    Ok::<_, Infallible>(PaginatedFetchResult {
                        items: vec!["a", "b"],
                        has_more: false,
                        current_page: page,
                    })
                }
            },
            PaginationOptions::new().page_size(2),
        ))
        .unwrap();

        assert_eq!(items, vec!["a", "b"]);
        assert_eq!(calls.into_inner(), vec![1]);
    }

    #[test]
    fn test_short_page_wins_over_has_more() {
        let calls = RefCell::new(0);

        let items = tokio_test::block_on(paginate_all(
            |page, _| {
                *calls.borrow_mut() += 1;
                let items = if page == 1 { vec![1, 2, 3, 4, 5] } else { vec![6] };
                async move {
                    Ok::<_, Infallible>(PaginatedFetchResult {
                        items,
                        has_more: true,
                        current_page: page,
                    })
                }
            },
            PaginationOptions::new().page_size(5),
        ))
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(calls.into_inner(), 2);
    }

    #[test]
    fn test_empty_page_stops() {
        let calls = RefCell::new(0);

        let items: Vec<u8> = tokio_test::block_on(paginate_all(
            |page, _| {
                *calls.borrow_mut() += 1;
                async move {
                    Ok::<_, Infallible>(PaginatedFetchResult {
                        items: Vec::new(),
                        has_more: true,
                        current_page: page,
                    })
                }
            },
            PaginationOptions::new(),
        ))
        .unwrap();

        assert!(items.is_empty());
        assert_eq!(calls.into_inner(), 1);
    }

    #[test]
    fn test_start_page_and_page_size_are_passed() {
        let calls = RefCell::new(Vec::new());

        tokio_test::block_on(paginate_all(
            |page, page_size| {
                calls.borrow_mut().push((page, page_size));
                let items = if page < 7 { vec![0; 10] } else { vec![0; 3] };
                async move { Ok::<_, Infallible>(create_paginated_result(items, page_size, page)) }
            },
            PaginationOptions::new().page_size(10).start_page(5),
        ))
        .unwrap();

        assert_eq!(calls.into_inner(), vec![(5, 10), (6, 10), (7, 10)]);
    }

    #[tokio::test]
    async fn test_max_pages_limits_calls() {
        let mut calls = 0;

        let items = paginate_all(
            |page, page_size| {
                calls += 1;
                async move {
                    Ok::<_, Infallible>(create_paginated_result(vec![page; 4], page_size, page))
                }
            },
            PaginationOptions::new().page_size(4).max_pages(3),
        )
        .await
        .unwrap();

        assert_eq!(calls, 3);
        assert_eq!(items.len(), 12);
        assert_eq!(items[0], 1);
        assert_eq!(items[11], 3);
    }

    #[tokio::test]
    async fn test_max_pages_zero_fetches_nothing() {
        let mut calls = 0;

        let items: Vec<u32> = paginate_all(
            |page, page_size| {
                calls += 1;
                async move {
                    Ok::<_, Infallible>(create_paginated_result(vec![], page_size, page))
                }
            },
            PaginationOptions::new().max_pages(0),
        )
        .await
        .unwrap();

        assert!(items.is_empty());
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_error_aborts_and_propagates() {
        let mut calls = 0;

        let result = paginate_all(
            |page, page_size| {
                calls += 1;
                async move {
                    if page == 2 {
                        Err("page 2 failed")
                    } else {
                        Ok(create_paginated_result(vec![page; 2], page_size, page))
                    }
                }
            },
            PaginationOptions::new().page_size(2),
        )
        .await;

        assert_eq!(result, Err("page 2 failed"));
        assert_eq!(calls, 2);
    }
}
