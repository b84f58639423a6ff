//! Page arithmetic: offsets, metadata and in-memory slicing.
//!
//! Pages are 1-based, offsets are 0-based. There is exactly one offset
//! formula, `(page - 1) * limit`, used by everything in this crate.

use serde::{Deserialize, Serialize};

use crate::Error;

/// Pagination metadata returned next to a page of results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total_records: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub next_page: Option<u64>,
    pub previous_page: Option<u64>,
    pub first_page: u64,
    pub last_page: u64,
}

/// A page of items together with its metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

fn ensure_positive(page: u64, limit: u64) -> Result<(), Error> {
    if limit == 0 {
        return Err(Error::InvalidLimit(0));
    }
    if page == 0 {
        return Err(Error::InvalidPage(0));
    }
    Ok(())
}

/// Zero-based record offset of a 1-based page.
///
/// Page `0` is treated like page `1`. Saturates instead of overflowing.
#[must_use]
pub fn offset(page: u64, limit: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(limit)
}

/// Compute pagination metadata for `total_records` split in pages of `limit`.
///
/// # Errors
/// Returns `Error::InvalidLimit` if `limit` is zero and `Error::InvalidPage`
/// if `page` is zero.
pub fn compute_meta(total_records: u64, page: u64, limit: u64) -> Result<PaginationMeta, Error> {
    ensure_positive(page, limit)?;

    let total_pages = total_records.div_ceil(limit);
    let has_next_page = page < total_pages;
    let has_previous_page = page > 1;

    Ok(PaginationMeta {
        total_records,
        page,
        limit,
        total_pages,
        has_next_page,
        has_previous_page,
        next_page: has_next_page.then(|| page + 1),
        previous_page: has_previous_page.then(|| page - 1),
        first_page: 1,
        last_page: total_pages,
    })
}

/// Contiguous sub-slice for the given page; empty once the offset passes the end.
///
/// # Errors
/// Same validation as [`compute_meta`].
pub fn slice_page<T>(items: &[T], page: u64, limit: u64) -> Result<&[T], Error> {
    ensure_positive(page, limit)?;

    let start = usize::try_from(offset(page, limit)).unwrap_or(usize::MAX);
    let len = usize::try_from(limit).unwrap_or(usize::MAX);

    let Some(rest) = items.get(start..) else {
        return Ok(&[]);
    };
    Ok(&rest[..rest.len().min(len)])
}

/// Paginate an already materialized collection.
///
/// # Errors
/// Same validation as [`compute_meta`].
pub fn paginate_in_memory<T: Clone>(items: &[T], page: u64, limit: u64) -> Result<Page<T>, Error> {
    let total = u64::try_from(items.len()).unwrap_or(u64::MAX);
    let meta = compute_meta(total, page, limit)?;
    let items = slice_page(items, page, limit)?.to_vec();
    Ok(Page { items, meta })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn meta_last_page_of_three() {
        let meta = compute_meta(25, 3, 10).unwrap();
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.previous_page, Some(2));
        assert_eq!(meta.first_page, 1);
        assert_eq!(meta.last_page, 3);
    }

    #[test]
    fn meta_empty_result() {
        let meta = compute_meta(0, 1, 10).unwrap();
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_previous_page);
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.previous_page, None);
    }

    #[test]
    fn meta_first_page_has_next() {
        let meta = compute_meta(25, 1, 10).unwrap();
        assert!(meta.has_next_page);
        assert_eq!(meta.next_page, Some(2));
        assert!(!meta.has_previous_page);
    }

    #[test]
    fn meta_total_pages_is_ceiling() {
        for limit in 1..=12_u64 {
            for total in 0..=40_u64 {
                let meta = compute_meta(total, 1, limit).unwrap();
                let expected = (0..).find(|pages| pages * limit >= total).unwrap();
                assert_eq!(meta.total_pages, expected, "total={total} limit={limit}");
            }
        }
    }

    #[test]
    fn meta_flags_follow_page_position() {
        for page in 1..=6_u64 {
            let meta = compute_meta(42, page, 10).unwrap();
            assert_eq!(meta.has_next_page, page < meta.total_pages, "page={page}");
            assert_eq!(meta.has_previous_page, page > 1, "page={page}");
        }
    }

    #[test]
    fn meta_rejects_zero_limit_and_page() {
        assert_eq!(compute_meta(10, 1, 0), Err(Error::InvalidLimit(0)));
        assert_eq!(compute_meta(10, 0, 10), Err(Error::InvalidPage(0)));
    }

    #[test]
    fn meta_serializes_camel_case_with_nulls() {
        let json = serde_json::to_value(compute_meta(0, 1, 10).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalRecords": 0,
                "page": 1,
                "limit": 10,
                "totalPages": 0,
                "hasNextPage": false,
                "hasPreviousPage": false,
                "nextPage": null,
                "previousPage": null,
                "firstPage": 1,
                "lastPage": 0
            })
        );
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(offset(1, 10), 0);
        assert_eq!(offset(2, 10), 10);
        assert_eq!(offset(3, 25), 50);
        assert_eq!(offset(0, 10), 0);
        assert_eq!(offset(u64::MAX, u64::MAX), u64::MAX);
    }

    #[test]
    fn slice_length_matches_formula() {
        let items: Vec<u32> = (0..23).collect();
        for limit in 1..=7_u64 {
            for page in 1..=8_u64 {
                let got = slice_page(&items, page, limit).unwrap();
                let start = (page - 1) * limit;
                let expected = limit.min(23_u64.saturating_sub(start));
                assert_eq!(got.len() as u64, expected, "page={page} limit={limit}");
                if let Some(first) = got.first() {
                    assert_eq!(u64::from(*first), start);
                }
            }
        }
    }

    #[test]
    fn slice_past_the_end_is_empty() {
        let items = [1, 2, 3];
        assert!(slice_page(&items, 2, 3).unwrap().is_empty());
        assert!(slice_page(&items, 10, 3).unwrap().is_empty());
        assert!(slice_page(&items, u64::MAX, u64::MAX).unwrap().is_empty());
    }

    #[test]
    fn slice_validates_arguments() {
        let items = [1, 2, 3];
        assert_eq!(slice_page(&items, 1, 0), Err(Error::InvalidLimit(0)));
        assert_eq!(slice_page(&items, 0, 1), Err(Error::InvalidPage(0)));
    }

    #[test]
    fn paginate_in_memory_combines_slice_and_meta() {
        let items: Vec<&str> = vec!["a", "b", "c", "d", "e"];
        let page = paginate_in_memory(&items, 2, 2).unwrap();
        assert_eq!(page.items, vec!["c", "d"]);
        assert_eq!(page.meta.total_records, 5);
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(page.meta.next_page, Some(3));
    }
}
