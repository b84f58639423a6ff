//! Filter/sort translation onto a query builder.
//!
//! The translator only needs a narrow capability from the underlying query
//! engine, expressed by [`QueryMutator`] and [`ExprBuilder`]. Any builder
//! exposing `and_where`, `set_parameter`, `add_order_by` and an expression
//! helper with `eq`, `like`, `literal` and `orx` can be driven by it.
//!
//! # Example
//!
//! ```ignore
//! use apikit_query::{AllowList, FilterSortTranslator, SortDir};
//!
//! let allow = AllowList::new()
//!     .insert("name", "u.name")
//!     .insert("fullName", "u.firstName,u.lastName")
//!     .insert("createdAt", "u.createdAt");
//!
//! FilterSortTranslator::new(allow)
//!     .default_sort("u.id", SortDir::Desc)
//!     .apply(&request.filters, &request.sort, &mut query)?;
//! ```

use std::collections::HashSet;

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use crate::{AllowList, DefaultSort, Error, FilterCondition, FilterSpec, SortDir, SortSpec};

/// Value bound to a named query parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    DateTime(NaiveDateTime),
}

/// Expression helper of a query builder.
pub trait ExprBuilder {
    /// Predicate type accepted by [`QueryMutator::and_where`]. Raw comparison
    /// text (`col > :param`) is converted with `From<String>`.
    type Predicate: From<String>;

    /// `left = right`; both sides are used verbatim.
    fn eq(&self, left: &str, right: &str) -> Self::Predicate;

    /// `left LIKE pattern`; `pattern` is used verbatim.
    fn like(&self, left: &str, pattern: &str) -> Self::Predicate;

    /// Disjunction of `parts`.
    fn orx(&self, parts: Vec<Self::Predicate>) -> Self::Predicate;

    /// Quoted string literal.
    fn literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }
}

/// Mutable query builder driven by [`FilterSortTranslator`].
pub trait QueryMutator {
    type Expr: ExprBuilder;

    fn expr(&self) -> Self::Expr;

    /// Conjoin `predicate` with the predicates added so far.
    fn and_where(&mut self, predicate: <Self::Expr as ExprBuilder>::Predicate);

    fn set_parameter(&mut self, name: &str, value: ParamValue);

    /// Append an ordering key after the ones added so far.
    fn add_order_by(&mut self, column: &str, dir: SortDir);
}

/// Applies request filters and sort to a [`QueryMutator`] through an [`AllowList`].
#[derive(Clone, Debug)]
pub struct FilterSortTranslator {
    allow_list: AllowList,
    default_sort: Option<DefaultSort>,
}

/// A filter resolved against the allow-list, ready to be emitted.
struct Planned<'a> {
    column: &'a str,
    condition: FilterCondition,
}

impl FilterSortTranslator {
    #[must_use]
    pub fn new(allow_list: AllowList) -> Self {
        Self {
            allow_list,
            default_sort: None,
        }
    }

    /// Ordering applied when the request yields no sort key.
    #[must_use]
    pub fn default_sort(mut self, column: impl Into<String>, dir: SortDir) -> Self {
        self.default_sort = Some(DefaultSort::new(column, dir));
        self
    }

    #[must_use]
    pub fn with_default_sort(mut self, default_sort: Option<DefaultSort>) -> Self {
        self.default_sort = default_sort;
        self
    }

    #[must_use]
    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Apply filters, then sort.
    ///
    /// # Errors
    /// Returns `Error::InvalidFilter` if a filter payload does not fit its
    /// operator; the query is left untouched in that case.
    pub fn apply<Q: QueryMutator>(
        &self,
        filters: &FilterSpec,
        sort: &SortSpec,
        query: &mut Q,
    ) -> Result<(), Error> {
        self.apply_filters(filters, query)?;
        self.apply_sort(sort, query);
        Ok(())
    }

    /// Apply every allow-listed filter with a supported operator.
    ///
    /// Unknown fields and unknown operators are skipped. Returns the number of
    /// predicates added.
    ///
    /// # Errors
    /// Returns `Error::InvalidFilter` if a filter payload does not fit its
    /// operator. All filters are validated before the first predicate is
    /// added, so a failure leaves the query untouched.
    pub fn apply_filters<Q: QueryMutator>(
        &self,
        filters: &FilterSpec,
        query: &mut Q,
    ) -> Result<usize, Error> {
        let plan = self.plan(filters)?;
        let mut params = ParamNames::default();
        let mut applied = 0;
        for item in &plan {
            if emit(item.column, &item.condition, &mut params, query) {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Apply allow-listed sort keys in request order.
    ///
    /// Unknown fields and invalid direction tokens are skipped. When nothing
    /// was applied the default sort is used, if configured. Returns the number
    /// of ordering keys added from the request.
    pub fn apply_sort<Q: QueryMutator>(&self, sort: &SortSpec, query: &mut Q) -> usize {
        let mut applied = 0;
        for (field, token) in sort {
            let Some(column) = self.allow_list.resolve(field) else {
                debug!(field = %field, "ignoring sort on field outside the allow-list");
                continue;
            };
            let Ok(dir) = token.parse::<SortDir>() else {
                debug!(field = %field, direction = %token, "ignoring sort with invalid direction");
                continue;
            };
            trace!(column, %dir, "adding order by");
            query.add_order_by(column, dir);
            applied += 1;
        }

        if applied == 0
            && let Some(default) = &self.default_sort
        {
            trace!(column = %default.column, dir = %default.dir, "adding default order by");
            query.add_order_by(&default.column, default.dir);
        }
        applied
    }

    fn plan<'a>(&'a self, filters: &FilterSpec) -> Result<Vec<Planned<'a>>, Error> {
        let mut plan = Vec::with_capacity(filters.len());
        for (field, raw) in filters {
            let Some(column) = self.allow_list.resolve(field) else {
                debug!(field = %field, "ignoring filter on field outside the allow-list");
                continue;
            };
            let Some(condition) = FilterCondition::parse(field, raw)? else {
                debug!(field = %field, operator = %raw.operator, "ignoring filter with unsupported operator");
                continue;
            };
            plan.push(Planned { column, condition });
        }
        Ok(plan)
    }
}

/// Emit one condition; false if it produced no predicate.
fn emit<Q: QueryMutator>(
    column: &str,
    condition: &FilterCondition,
    params: &mut ParamNames,
    query: &mut Q,
) -> bool {
    let expr = query.expr();
    trace!(column, operator = %condition.operator(), "adding filter");

    match condition {
        FilterCondition::Equal(value) => {
            let predicate = if is_boolean_literal(value) {
                expr.eq(column, value)
            } else {
                expr.eq(column, &expr.literal(value))
            };
            query.and_where(predicate);
        }
        FilterCondition::Like(value) => {
            let pattern = expr.literal(&contains_pattern(value));
            query.and_where(expr.like(column, &pattern));
        }
        FilterCondition::Or(value) => {
            let pattern = expr.literal(&contains_pattern(value));
            let parts: Vec<_> = split_columns(column)
                .map(|col| expr.like(col, &pattern))
                .collect();
            if parts.is_empty() {
                return false;
            }
            query.and_where(expr.orx(parts));
        }
        FilterCondition::Gt(value) => {
            let param = params.claim(column, &[""]);
            query.and_where(format!("{column} > :{param}").into());
            query.set_parameter(&param, ParamValue::Text(value.clone()));
        }
        FilterCondition::Between { first, second } => {
            let param = params.claim(column, &["_from", "_to"]);
            let from = format!("{param}_from");
            let to = format!("{param}_to");
            query.and_where(format!("{column} >= :{from} AND {column} <= :{to}").into());
            query.set_parameter(&from, ParamValue::DateTime(*first));
            query.set_parameter(&to, ParamValue::DateTime(*second));
        }
    }
    true
}

/// Exact `"true"`/`"false"` text compares as an unquoted boolean.
fn is_boolean_literal(value: &str) -> bool {
    value == "true" || value == "false"
}

fn contains_pattern(value: &str) -> String {
    format!("%{value}%")
}

fn split_columns(column: &str) -> impl Iterator<Item = &str> {
    column.split(',').map(str::trim).filter(|c| !c.is_empty())
}

/// Parameter name for a column expression: the segment after the last `.`,
/// restricted to `[A-Za-z0-9_]`.
fn parameter_name(column: &str) -> String {
    let segment = column.rsplit('.').next().unwrap_or(column);
    let name: String = segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() {
        "param".to_owned()
    } else {
        name
    }
}

/// Parameter names bound during one translation.
#[derive(Default)]
struct ParamNames {
    used: HashSet<String>,
}

impl ParamNames {
    /// Stem for `column` such that every `stem + suffix` is still unbound.
    ///
    /// The first claim of a stem gets the bare name, later ones `_2`, `_3`...
    fn claim(&mut self, column: &str, suffixes: &[&str]) -> String {
        let base = parameter_name(column);
        let mut stem = base.clone();
        let mut n = 2;
        while suffixes
            .iter()
            .any(|suffix| self.used.contains(&format!("{stem}{suffix}")))
        {
            stem = format!("{base}_{n}");
            n += 1;
        }
        for suffix in suffixes {
            self.used.insert(format!("{stem}{suffix}"));
        }
        stem
    }
}
