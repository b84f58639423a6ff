//! SQL text query builder for the apikit filter/sort translator.
//!
//! `SqlQuery` implements [`apikit_query::QueryMutator`]: the translator adds
//! predicates, named parameters and ordering keys to it, and the caller
//! renders the statement and binds the parameters with its database driver.
//!
//! ```ignore
//! use apikit_db::SqlQuery;
//! use apikit_query::{AllowList, FilterSortTranslator, SortDir};
//!
//! let mut query = SqlQuery::select("u.*", "users u").paginate(&request);
//! FilterSortTranslator::new(allow_list)
//!     .default_sort("u.id", SortDir::Desc)
//!     .apply(&request.filters, &request.sort, &mut query)?;
//!
//! let rows = driver.fetch(&query.to_sql(), query.parameters()).await?;
//! let total = driver.count(&query.count_sql(), query.parameters()).await?;
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod sql;

pub use sql::{SqlExpr, SqlPredicate, SqlQuery};
