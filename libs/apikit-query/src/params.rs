//! List request parameters and their normalization.

use serde::Deserialize;

use crate::page::offset;
use crate::{Error, FilterSpec, PagingLimits, SortSpec};

/// Raw list parameters as they arrive on a request. All of them are optional.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListQueryParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
    #[serde(default)]
    pub filters: Option<FilterSpec>,
}

/// Normalized list request.
#[derive(Clone, Debug, PartialEq)]
pub struct ListRequest {
    /// Zero-based offset of the first record, `(page - 1) * limit`
    pub start: u64,
    /// 1-based page number
    pub page: u64,
    /// Page size, clamped to the configured maximum
    pub limit: u64,
    pub search: Option<String>,
    pub sort: SortSpec,
    pub filters: FilterSpec,
}

impl ListQueryParams {
    /// Apply defaults, validate and clamp.
    ///
    /// # Errors
    /// See [`normalize_request_params`].
    pub fn normalize(self, limits: &PagingLimits) -> Result<ListRequest, Error> {
        normalize_request_params(
            self.page,
            self.limit,
            self.search,
            self.sort,
            self.filters,
            limits,
        )
    }
}

/// Normalize raw list parameters.
///
/// - `page` defaults to 1, `limit` to `limits.default_limit`
/// - `limit` above `limits.max_limit` is clamped
/// - `start` is the zero-based offset `(page - 1) * limit`
/// - a blank `search` becomes `None`
///
/// # Errors
/// Returns `Error::InvalidPage` if `page < 1` and `Error::InvalidLimit` if
/// `limit < 1`, including a zero `limits.default_limit` used in its place.
pub fn normalize_request_params(
    raw_page: Option<i64>,
    raw_limit: Option<i64>,
    raw_search: Option<String>,
    raw_sort: Option<SortSpec>,
    raw_filters: Option<FilterSpec>,
    limits: &PagingLimits,
) -> Result<ListRequest, Error> {
    let page = match raw_page {
        None => 1,
        Some(p) => u64::try_from(p)
            .ok()
            .filter(|p| *p > 0)
            .ok_or(Error::InvalidPage(p))?,
    };

    let limit = match raw_limit {
        None => {
            let default = i64::try_from(limits.default_limit).unwrap_or(i64::MAX);
            limits.validate_limit(default)?
        }
        Some(l) => limits.validate_limit(l)?,
    };

    let search = raw_search
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty());

    Ok(ListRequest {
        start: offset(page, limit),
        page,
        limit,
        search,
        sort: raw_sort.unwrap_or_default(),
        filters: raw_filters.unwrap_or_default(),
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_when_absent() {
        let req = ListQueryParams::default()
            .normalize(&PagingLimits::default())
            .unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 10);
        assert_eq!(req.start, 0);
        assert_eq!(req.search, None);
        assert!(req.sort.is_empty());
        assert!(req.filters.is_empty());
    }

    #[test]
    fn second_page_offset_is_ten() {
        let req =
            normalize_request_params(Some(2), Some(10), None, None, None, &PagingLimits::default())
                .unwrap();
        assert_eq!(req.start, 10);
    }

    #[test]
    fn limit_is_clamped_to_max() {
        let req =
            normalize_request_params(Some(3), Some(1000), None, None, None, &PagingLimits::default())
                .unwrap();
        assert_eq!(req.limit, 100);
        assert_eq!(req.start, 200);
    }

    #[test]
    fn rejects_non_positive_page_and_limit() {
        let limits = PagingLimits::default();
        assert_eq!(
            normalize_request_params(Some(0), None, None, None, None, &limits),
            Err(Error::InvalidPage(0))
        );
        assert_eq!(
            normalize_request_params(Some(-3), None, None, None, None, &limits),
            Err(Error::InvalidPage(-3))
        );
        assert_eq!(
            normalize_request_params(None, Some(0), None, None, None, &limits),
            Err(Error::InvalidLimit(0))
        );
    }

    #[test]
    fn search_is_trimmed() {
        let limits = PagingLimits::default();
        let req = normalize_request_params(None, None, Some("  john ".to_owned()), None, None, &limits)
            .unwrap();
        assert_eq!(req.search.as_deref(), Some("john"));

        let req =
            normalize_request_params(None, None, Some("   ".to_owned()), None, None, &limits).unwrap();
        assert_eq!(req.search, None);
    }

    #[test]
    fn deserializes_full_request() {
        let params: ListQueryParams = serde_json::from_value(json!({
            "page": 2,
            "limit": 25,
            "search": "anna",
            "sort": {"lastName": "ASC", "id": "DESC"},
            "filters": {"status": {"operator": "equal", "data": "active"}}
        }))
        .unwrap();

        let req = params.normalize(&PagingLimits::default()).unwrap();
        assert_eq!(req.start, 25);
        assert_eq!(req.sort.len(), 2);
        assert_eq!(req.filters["status"].operator, "equal");
    }

    #[test]
    fn custom_default_limit() {
        let limits = PagingLimits::new().with_default_limit(20);
        let req = ListQueryParams {
            page: Some(4),
            ..ListQueryParams::default()
        }
        .normalize(&limits)
        .unwrap();
        assert_eq!(req.limit, 20);
        assert_eq!(req.start, 60);
    }

    #[test]
    fn zero_default_limit_is_rejected() {
        let limits = PagingLimits::new().with_default_limit(0);

        let err = ListQueryParams::default().normalize(&limits).unwrap_err();

        assert_eq!(err, Error::InvalidLimit(0));
    }

    #[test]
    fn oversized_default_limit_is_clamped() {
        let limits = PagingLimits::new().with_default_limit(500).with_max_limit(50);

        let req = ListQueryParams::default().normalize(&limits).unwrap();

        assert_eq!(req.limit, 50);
    }
}
