//! Sort request primitives.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::SortDir;

/// Requested ordering: logical field name → direction token (`ASC`/`DESC`).
///
/// Insertion order is significant, each entry becomes one successive
/// `ORDER BY` key. Tokens are kept raw and parsed when applied so an invalid
/// token only drops its own entry.
pub type SortSpec = IndexMap<String, String>;

/// Ordering applied when a request asks for none.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSort {
    /// Column expression, e.g. `u.id`
    pub column: String,
    #[serde(default = "default_dir")]
    pub dir: SortDir,
}

fn default_dir() -> SortDir {
    SortDir::Desc
}

impl DefaultSort {
    #[must_use]
    pub fn new(column: impl Into<String>, dir: SortDir) -> Self {
        Self {
            column: column.into(),
            dir,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn sort_spec_keeps_insertion_order() {
        let spec: SortSpec =
            serde_json::from_str(r#"{"lastName":"ASC","firstName":"DESC","age":"asc"}"#).unwrap();
        let keys: Vec<&str> = spec.keys().map(String::as_str).collect();
        assert_eq!(keys, ["lastName", "firstName", "age"]);
    }

    #[test]
    fn sort_spec_from_json_value_keeps_insertion_order() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"name":"ASC","createdAt":"DESC","id":"DESC"}"#).unwrap();

        let spec: SortSpec = serde_json::from_value(value).unwrap();

        let keys: Vec<&str> = spec.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "createdAt", "id"]);
    }

    #[test]
    fn default_sort_direction_defaults_to_desc() {
        let sort: DefaultSort = serde_json::from_str(r#"{"column":"p.id"}"#).unwrap();
        assert_eq!(sort, DefaultSort::new("p.id", SortDir::Desc));
    }
}
