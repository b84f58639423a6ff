//! Filter request primitives and their typed form.
//!
//! A request carries filters as `field → {operator, data}` with a string
//! operator and a free-form JSON payload. [`FilterCondition::parse`] turns
//! one entry into a typed condition whose payload shape matches its operator:
//!
//! | operator  | data                                   | condition              |
//! |-----------|----------------------------------------|------------------------|
//! | `equal`   | scalar                                 | `Equal(text)`          |
//! | `like`    | scalar                                 | `Like(text)`           |
//! | `or`      | scalar                                 | `Or(text)`             |
//! | `gt`      | scalar                                 | `Gt(text)`             |
//! | `between` | `{"first": date, "second": date}`      | `Between{first,second}`|

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

/// Requested filters: logical field name → raw filter.
pub type FilterSpec = IndexMap<String, RawFilter>;

/// One filter as received from the request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawFilter {
    pub operator: String,
    #[serde(default)]
    pub data: Value,
}

impl RawFilter {
    #[must_use]
    pub fn new(operator: impl Into<String>, data: impl Into<Value>) -> Self {
        Self {
            operator: operator.into(),
            data: data.into(),
        }
    }
}

/// Supported filter operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOperator {
    Equal,
    Like,
    Or,
    Gt,
    Between,
}

impl FilterOperator {
    pub const ALL: &'static [FilterOperator] = &[
        FilterOperator::Equal,
        FilterOperator::Like,
        FilterOperator::Or,
        FilterOperator::Gt,
        FilterOperator::Between,
    ];

    /// Request token for this operator
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FilterOperator::Equal => "equal",
            FilterOperator::Like => "like",
            FilterOperator::Or => "or",
            FilterOperator::Gt => "gt",
            FilterOperator::Between => "between",
        }
    }

    /// Resolve an operator token, or None if not supported. Tokens match
    /// exactly: `LIKE` or ` like ` are not operators.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.name() == name)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed filter condition, one variant per operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterCondition {
    /// `column = 'data'`, or unquoted `column = true|false`
    Equal(String),
    /// `column LIKE '%data%'`
    Like(String),
    /// `(c1 LIKE '%data%' OR c2 LIKE '%data%' ...)` over a comma-separated column list
    Or(String),
    /// `column > :param`
    Gt(String),
    /// `column >= :from AND column <= :to`
    Between {
        first: NaiveDateTime,
        second: NaiveDateTime,
    },
}

impl FilterCondition {
    /// Operator of this condition
    #[must_use]
    pub fn operator(&self) -> FilterOperator {
        match self {
            FilterCondition::Equal(_) => FilterOperator::Equal,
            FilterCondition::Like(_) => FilterOperator::Like,
            FilterCondition::Or(_) => FilterOperator::Or,
            FilterCondition::Gt(_) => FilterOperator::Gt,
            FilterCondition::Between { .. } => FilterOperator::Between,
        }
    }

    /// Parse a raw filter for `field`.
    ///
    /// Returns `Ok(None)` when the operator is not supported; such filters are
    /// ignored by the caller.
    ///
    /// # Errors
    /// Returns `Error::InvalidFilter` if the payload does not fit the operator:
    /// a non-scalar value for a scalar operator, or a `between` payload whose
    /// bounds are missing or not date-like.
    pub fn parse(field: &str, raw: &RawFilter) -> Result<Option<Self>, Error> {
        let Some(op) = FilterOperator::from_name(&raw.operator) else {
            return Ok(None);
        };

        let condition = match op {
            FilterOperator::Equal => FilterCondition::Equal(scalar(field, op, &raw.data)?),
            FilterOperator::Like => FilterCondition::Like(scalar(field, op, &raw.data)?),
            FilterOperator::Or => FilterCondition::Or(scalar(field, op, &raw.data)?),
            FilterOperator::Gt => FilterCondition::Gt(scalar(field, op, &raw.data)?),
            FilterOperator::Between => FilterCondition::Between {
                first: bound(field, &raw.data, "first")?,
                second: bound(field, &raw.data, "second")?,
            },
        };
        Ok(Some(condition))
    }
}

/// Render a scalar JSON payload as text; strings are taken verbatim.
fn scalar(field: &str, op: FilterOperator, data: &Value) -> Result<String, Error> {
    match data {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(Error::invalid_filter(
            field,
            format!("operator '{op}' expects a scalar value"),
        )),
    }
}

fn bound(field: &str, data: &Value, key: &str) -> Result<NaiveDateTime, Error> {
    let raw = data
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::invalid_filter(field, format!("'between' requires '{key}'")))?;
    parse_date_like(raw).ok_or_else(|| {
        Error::invalid_filter(field, format!("'{key}' is not a date: {raw}"))
    })
}

/// Parse a date-like string.
///
/// Accepted forms: RFC 3339 (normalized to UTC), `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD` (midnight).
#[must_use]
pub fn parse_date_like(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
