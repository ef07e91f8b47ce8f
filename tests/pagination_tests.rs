//! Integration tests for the pagination driver.
//!
//! The fetchers here simulate an API with a fixed set of pages and record
//! every call, so both the accumulated items and the exact request sequence
//! can be checked.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use reverb_api::rest::{
    create_paginated_result, paginate_all, PaginatedFetchResult, PaginationOptions,
};
use reverb_api::HttpError;

/// A simulated paginated endpoint.
struct FakePages {
    pages: Vec<Vec<u32>>,
    calls: Mutex<Vec<(u32, u32)>>,
}

impl FakePages {
    fn new(pages: Vec<Vec<u32>>) -> Self {
        Self {
            pages,
            calls: Mutex::new(Vec::new()),
        }
    }

    async fn fetch(&self, page: u32, page_size: u32) -> Result<PaginatedFetchResult<u32>, HttpError> {
        self.calls.lock().unwrap().push((page, page_size));
        tokio::time::sleep(Duration::from_millis(1)).await;

        let items = self
            .pages
            .get((page - 1) as usize)
            .cloned()
            .unwrap_or_default();
        Ok(create_paginated_result(items, page_size, page))
    }

    fn calls(&self) -> Vec<(u32, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[tokio::test]
async fn test_three_pages_with_short_last_page() {
    let api = FakePages::new(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);

    let items = paginate_all(
        |page, page_size| api.fetch(page, page_size),
        PaginationOptions::new().page_size(3),
    )
    .await
    .unwrap();

    assert_eq!(items, vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(api.calls(), vec![(1, 3), (2, 3), (3, 3)]);
}

#[tokio::test]
async fn test_exact_multiple_needs_one_empty_page() {
    let api = FakePages::new(vec![vec![1, 2], vec![3, 4]]);

    let items = paginate_all(
        |page, page_size| api.fetch(page, page_size),
        PaginationOptions::new().page_size(2),
    )
    .await
    .unwrap();

    assert_eq!(items, vec![1, 2, 3, 4]);
    assert_eq!(api.calls().len(), 3);
}

#[tokio::test]
async fn test_first_page_without_more_stops_immediately() {
    let calls = AtomicU32::new(0);

    let items = paginate_all(
        |page, _| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                Ok::<_, HttpError>(PaginatedFetchResult {
                    items: vec!["only", "page"],
                    has_more: false,
                    current_page: page,
                })
            }
        },
        PaginationOptions::new().page_size(2),
    )
    .await
    .unwrap();

    assert_eq!(items, vec!["only", "page"]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_short_page_overrides_has_more() {
    let calls = AtomicU32::new(0);

    let items = paginate_all(
        |page, _| {
            calls.fetch_add(1, Ordering::SeqCst);
            let items: Vec<u32> = if page == 1 { (1..=5).collect() } else { vec![6] };
            async move {
                Ok::<_, HttpError>(PaginatedFetchResult {
                    items,
                    has_more: true,
                    current_page: page,
                })
            }
        },
        PaginationOptions::new().page_size(5),
    )
    .await
    .unwrap();

    assert_eq!(items.len(), 6);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_max_pages_caps_an_endless_api() {
    let calls = AtomicU32::new(0);

    let items = paginate_all(
        |page, page_size| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                Ok::<_, HttpError>(create_paginated_result(
                    vec![page; page_size as usize],
                    page_size,
                    page,
                ))
            }
        },
        PaginationOptions::new().page_size(10).max_pages(3),
    )
    .await
    .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(items.len(), 30);
    assert!(items[20..].iter().all(|&page| page == 3));
}

#[tokio::test]
async fn test_start_page_offsets_requests() {
    let api = FakePages::new(vec![vec![1, 2], vec![3, 4], vec![5]]);

    let items = paginate_all(
        |page, page_size| api.fetch(page, page_size),
        PaginationOptions::new().page_size(2).start_page(2),
    )
    .await
    .unwrap();

    assert_eq!(items, vec![3, 4, 5]);
    assert_eq!(api.calls(), vec![(2, 2), (3, 2)]);
}

#[tokio::test]
async fn test_failing_page_discards_partial_results() {
    let calls = AtomicU32::new(0);

    let result = paginate_all(
        |page, page_size| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if page == 3 {
                    return Err(HttpError::network("connection reset"));
                }
                Ok(create_paginated_result(vec![page; 4], page_size, page))
            }
        },
        PaginationOptions::new().page_size(4),
    )
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.message, "connection reset");
    assert!(err.is_network_error);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}
