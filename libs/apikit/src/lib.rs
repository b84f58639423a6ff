#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! # `ApiKit`
//!
//! Helpers for JSON HTTP APIs:
//!
//! - [`response`]: the standard response envelope (`hasError`,
//!   `additionalErrors`, `message`, `result`, `redirect`) and its builders
//! - [`config`]: page size limits and default ordering loaded with `figment`
//! - re-exports of the pagination and filter/sort primitives from
//!   `apikit_query`, and of the error catalog from `apikit_errors`
//!
//! ## Example
//!
//! ```
//! use apikit::{compute_meta, success};
//!
//! let meta = compute_meta(25, 3, 10).unwrap();
//! let response = success("Users", vec!["ada", "grace"], Some(meta));
//!
//! assert_eq!(response.status(), 200);
//! assert_eq!(response.body().pagination(), Some(&meta));
//! ```

pub mod config;
pub mod response;

#[cfg(feature = "axum")]
mod axum_ext;

pub use config::{ApiKitConfig, ConfigError};
pub use response::{
    ApiResponse, Envelope, EnvelopeResult, NO_ITEMS_FOUND, build_error, build_redirect,
    build_success, error, from_query_error, no_items_found, not_found, redirect, success,
};

pub use apikit_errors::{ErrDef, ErrorDetail, catalog};
pub use apikit_query::{
    AllowList, DefaultSort, Error as QueryError, FilterSortTranslator, FilterSpec,
    ListQueryParams, ListRequest, PaginationMeta, PagingLimits, QueryMutator, SortDir, SortSpec,
    compute_meta, normalize_request_params, offset, slice_page,
};
