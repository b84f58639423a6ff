use std::collections::BTreeMap;
use std::fmt;

use apikit_query::{ExprBuilder, ListRequest, ParamValue, QueryMutator, SortDir};

/// A single `WHERE` predicate in SQL text form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SqlPredicate(String);

impl SqlPredicate {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SqlPredicate {
    fn from(sql: String) -> Self {
        Self(sql)
    }
}

impl fmt::Display for SqlPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Expression helper producing SQL text.
#[derive(Clone, Copy, Debug, Default)]
pub struct SqlExpr;

impl ExprBuilder for SqlExpr {
    type Predicate = SqlPredicate;

    fn eq(&self, left: &str, right: &str) -> SqlPredicate {
        SqlPredicate(format!("{left} = {right}"))
    }

    fn like(&self, left: &str, pattern: &str) -> SqlPredicate {
        SqlPredicate(format!("{left} LIKE {pattern}"))
    }

    fn orx(&self, parts: Vec<SqlPredicate>) -> SqlPredicate {
        let joined = parts
            .iter()
            .map(SqlPredicate::as_str)
            .collect::<Vec<_>>()
            .join(" OR ");
        SqlPredicate(format!("({joined})"))
    }
}

/// `SELECT` statement assembled clause by clause.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct SqlQuery {
    projection: String,
    from: String,
    predicates: Vec<SqlPredicate>,
    parameters: BTreeMap<String, ParamValue>,
    order_by: Vec<(String, SortDir)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl SqlQuery {
    /// `SELECT {projection} FROM {from}`; `from` may carry an alias (`users u`).
    pub fn select(projection: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            projection: projection.into(),
            from: from.into(),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Limit and offset of a normalized list request.
    pub fn paginate(self, request: &ListRequest) -> Self {
        self.with_limit(request.limit).with_offset(request.start)
    }

    #[must_use]
    pub fn predicates(&self) -> &[SqlPredicate] {
        &self.predicates
    }

    /// Named parameters, ordered by name.
    #[must_use]
    pub fn parameters(&self) -> &BTreeMap<String, ParamValue> {
        &self.parameters
    }

    #[must_use]
    pub fn order_by(&self) -> &[(String, SortDir)] {
        &self.order_by
    }

    /// Conjunction of all predicates, each parenthesized.
    #[must_use]
    pub fn where_clause(&self) -> Option<String> {
        if self.predicates.is_empty() {
            return None;
        }
        Some(
            self.predicates
                .iter()
                .map(|p| format!("({p})"))
                .collect::<Vec<_>>()
                .join(" AND "),
        )
    }

    #[must_use]
    pub fn order_by_clause(&self) -> Option<String> {
        if self.order_by.is_empty() {
            return None;
        }
        Some(
            self.order_by
                .iter()
                .map(|(column, dir)| format!("{column} {dir}"))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// Full statement with `WHERE`, `ORDER BY`, `LIMIT` and `OFFSET` as set.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = format!("SELECT {} FROM {}", self.projection, self.from);
        if let Some(clause) = self.where_clause() {
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
        }
        if let Some(clause) = self.order_by_clause() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&clause);
        }
        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&limit.to_string());
        }
        if let Some(offset) = self.offset {
            sql.push_str(" OFFSET ");
            sql.push_str(&offset.to_string());
        }
        tracing::trace!(sql = %sql, params = self.parameters.len(), "rendered list query");
        sql
    }

    /// `COUNT(*)` over the same source and predicates, for the total record count.
    #[must_use]
    pub fn count_sql(&self) -> String {
        match self.where_clause() {
            Some(clause) => format!("SELECT COUNT(*) FROM {} WHERE {clause}", self.from),
            None => format!("SELECT COUNT(*) FROM {}", self.from),
        }
    }
}

impl QueryMutator for SqlQuery {
    type Expr = SqlExpr;

    fn expr(&self) -> SqlExpr {
        SqlExpr
    }

    fn and_where(&mut self, predicate: SqlPredicate) {
        self.predicates.push(predicate);
    }

    fn set_parameter(&mut self, name: &str, value: ParamValue) {
        self.parameters.insert(name.to_owned(), value);
    }

    fn add_order_by(&mut self, column: &str, dir: SortDir) {
        self.order_by.push((column.to_owned(), dir));
    }
}

impl fmt::Display for SqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
