//! Allow-list of filterable and sortable fields.
//!
//! Maps API-visible field names to the column expressions used in queries.
//! Anything not listed here never reaches the query builder: the translator
//! skips unknown fields instead of passing request-supplied names through.

use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
#[must_use]
pub struct AllowList {
    map: HashMap<String, String>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `api_name`, mapped to `column` (e.g. `u.createdAt`).
    ///
    /// For the `or` operator the column may list several expressions
    /// separated by commas (`u.firstName,u.lastName`).
    pub fn insert(mut self, api_name: impl Into<String>, column: impl Into<String>) -> Self {
        self.map.insert(api_name.into(), column.into());
        self
    }

    /// Column expression for `name`. Names match exactly, case included.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AllowList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |list, (name, column)| list.insert(name, column))
    }
}
