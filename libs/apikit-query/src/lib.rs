#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod allow_list;
pub mod error_mapping;
pub mod filter;
pub mod limits;
pub mod page;
pub mod params;
pub mod sort;
pub mod translate;

pub use allow_list::AllowList;
pub use filter::{FilterCondition, FilterOperator, FilterSpec, RawFilter};
pub use limits::PagingLimits;
pub use page::{Page, PaginationMeta, compute_meta, offset, paginate_in_memory, slice_page};
pub use params::{ListQueryParams, ListRequest, normalize_request_params};
pub use sort::{DefaultSort, SortSpec};
pub use translate::{ExprBuilder, FilterSortTranslator, ParamValue, QueryMutator};

// Ordering primitives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SortDir {
    #[serde(rename = "ASC", alias = "asc", alias = "Asc")]
    Asc,
    #[serde(rename = "DESC", alias = "desc", alias = "Desc")]
    Desc,
}

impl SortDir {
    /// Reverse the sort direction (Asc <-> Desc)
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    /// SQL keyword for this direction
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortDir {
    type Err = Error;

    /// Parse a direction token, case-insensitive (`ASC`, `asc`, `Desc`, ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("asc") {
            Ok(SortDir::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Ok(SortDir::Desc)
        } else {
            Err(Error::InvalidSort(token.to_owned()))
        }
    }
}

impl std::fmt::Display for SortDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Unified error type for paging, filter and sort handling
///
/// ## Envelope mapping
///
/// Every variant maps to an entry of the `apikit_errors` catalog, see
/// [`error_mapping`]:
/// - `InvalidPage`, `InvalidLimit`, `InvalidSort` → 400 `INVALID_ARGUMENT`
/// - `InvalidFilter` → 400 `INVALID_FILTER`
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid page {0}: page must be at least 1")]
    InvalidPage(i64),

    #[error("invalid limit {0}: limit must be at least 1")]
    InvalidLimit(i64),

    #[error("invalid filter on '{field}': {reason}")]
    InvalidFilter { field: String, reason: String },

    #[error("invalid sort direction: {0}")]
    InvalidSort(String),
}

impl Error {
    /// True for the argument-validation class of errors (bad page, limit or direction).
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::InvalidPage(_) | Error::InvalidLimit(_) | Error::InvalidSort(_)
        )
    }

    pub(crate) fn invalid_filter(field: &str, reason: impl Into<String>) -> Self {
        Error::InvalidFilter {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }
}
