//! Configuration for list endpoints.
//!
//! The settings live under the `apikit` section of the application config:
//!
//! ```yaml
//! apikit:
//!   pagination:
//!     default_limit: 20
//!     max_limit: 50
//!   default_sort:
//!     column: u.createdAt
//!     dir: DESC
//! ```
//!
//! Loading is lenient: a missing section yields the defaults, a present but
//! malformed or inconsistent one is an error.

use std::path::Path;

use apikit_query::{AllowList, DefaultSort, FilterSortTranslator, PagingLimits};
use figment::Figment;
use figment::error::Kind;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Config section holding the apikit settings.
pub const CONFIG_SECTION: &str = "apikit";

/// Prefix of environment overrides, e.g. `APIKIT__PAGINATION__MAX_LIMIT=50`.
pub const ENV_PREFIX: &str = "APIKIT__";

/// Configuration error for apikit settings
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read 'apikit' config: {0}")]
    Extract(#[from] Box<figment::Error>),
    #[error("invalid 'apikit' config: {reason}")]
    Invalid { reason: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKitConfig {
    pub pagination: PagingLimits,
    /// Ordering applied when a request carries no usable sort
    pub default_sort: Option<DefaultSort>,
}

impl ApiKitConfig {
    /// Read the `apikit` section of an already assembled figment.
    ///
    /// # Errors
    /// Returns `ConfigError::Extract` if the section cannot be deserialized
    /// and `ConfigError::Invalid` if the page size limits are inconsistent.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        match figment.find_value(CONFIG_SECTION) {
            Ok(_) => {}
            Err(e) if matches!(e.kind, Kind::MissingField(_)) => {
                tracing::debug!(
                    section = CONFIG_SECTION,
                    "config section not found, using defaults"
                );
                return Ok(Self::default());
            }
            Err(e) => return Err(Box::new(e).into()),
        }

        let config: Self = figment.extract_inner(CONFIG_SECTION).map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file, overridden by `APIKIT__*` environment variables.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file is malformed or the resulting
    /// settings are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading apikit configuration");

        let figment = Figment::new()
            .merge(Serialized::default(CONFIG_SECTION, Self::default()))
            .merge(Yaml::file(path))
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .split("__")
                    .map(|key| format!("{CONFIG_SECTION}.{key}").into()),
            );

        Self::from_figment(&figment)
    }

    /// Check the page size limits.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if a limit is zero or the default page
    /// size exceeds the maximum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let PagingLimits {
            default_limit,
            max_limit,
        } = self.pagination;

        let reason = if default_limit == 0 {
            "pagination.default_limit must be at least 1".to_owned()
        } else if max_limit == 0 {
            "pagination.max_limit must be at least 1".to_owned()
        } else if default_limit > max_limit {
            format!(
                "pagination.default_limit ({default_limit}) exceeds pagination.max_limit ({max_limit})"
            )
        } else {
            return Ok(());
        };

        Err(ConfigError::Invalid { reason })
    }

    /// Translator guarded by `allow_list`, using the configured default sort.
    #[must_use]
    pub fn translator(&self, allow_list: AllowList) -> FilterSortTranslator {
        FilterSortTranslator::new(allow_list).with_default_sort(self.default_sort.clone())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use apikit_db::SqlQuery;
    use apikit_query::{SortDir, SortSpec};
    use serde_json::json;

    #[test]
    fn missing_section_returns_defaults() {
        let figment = Figment::new().merge(Serialized::defaults(json!({"server": {}})));

        let config = ApiKitConfig::from_figment(&figment).unwrap();

        assert_eq!(config, ApiKitConfig::default());
        assert_eq!(config.pagination.default_limit, 10);
        assert_eq!(config.pagination.max_limit, 100);
        assert!(config.default_sort.is_none());
    }

    #[test]
    fn partial_section_keeps_remaining_defaults() {
        let figment = Figment::new().merge(Serialized::defaults(json!({
            "apikit": {
                "pagination": {"max_limit": 50},
                "default_sort": {"column": "u.id"}
            }
        })));

        let config = ApiKitConfig::from_figment(&figment).unwrap();

        assert_eq!(config.pagination.default_limit, 10);
        assert_eq!(config.pagination.max_limit, 50);
        assert_eq!(
            config.default_sort,
            Some(DefaultSort::new("u.id", SortDir::Desc))
        );
    }

    #[test]
    fn malformed_section_is_an_error() {
        let figment = Figment::new().merge(Serialized::defaults(json!({
            "apikit": {"pagination": {"max_limit": "lots"}}
        })));

        let err = ApiKitConfig::from_figment(&figment).unwrap_err();
        assert!(matches!(err, ConfigError::Extract(_)));
    }

    #[test]
    fn inconsistent_limits_are_rejected() {
        for pagination in [
            json!({"default_limit": 0}),
            json!({"max_limit": 0, "default_limit": 0}),
            json!({"default_limit": 20, "max_limit": 5}),
        ] {
            let figment = Figment::new().merge(Serialized::defaults(json!({
                "apikit": {"pagination": pagination}
            })));

            let err = ApiKitConfig::from_figment(&figment).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{err}");
        }
    }

    #[test]
    fn validate_reports_offending_values() {
        let config = ApiKitConfig {
            pagination: PagingLimits::new().with_default_limit(30).with_max_limit(20),
            default_sort: None,
        };

        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid 'apikit' config: pagination.default_limit (30) exceeds pagination.max_limit (20)"
        );
    }

    #[test]
    fn translator_uses_configured_default_sort() {
        let config = ApiKitConfig {
            pagination: PagingLimits::default(),
            default_sort: Some(DefaultSort::new("u.createdAt", SortDir::Asc)),
        };
        let allow_list: AllowList = [("name", "u.name")].into_iter().collect();
        let mut query = SqlQuery::select("*", "users u");

        let translator = config.translator(allow_list);
        let applied = translator.apply_sort(&SortSpec::new(), &mut query);

        assert_eq!(applied, 0);

        assert!(translator.allow_list().contains("name"));
        assert_eq!(query.to_sql(), "SELECT * FROM users u ORDER BY u.createdAt ASC");
    }
}
