//! Page size limits applied while normalizing list requests
//!
//! - default page size when the caller sends none
//! - maximum page size; larger requests are clamped, not rejected

use serde::{Deserialize, Serialize};

use crate::Error;

/// Default configuration for page size limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingLimits {
    /// Page size used when the request carries no limit (default: 10)
    pub default_limit: u64,
    /// Largest page size a request may ask for (default: 100)
    pub max_limit: u64,
}

impl Default for PagingLimits {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

impl PagingLimits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default page size
    #[must_use]
    pub fn with_default_limit(mut self, limit: u64) -> Self {
        self.default_limit = limit;
        self
    }

    /// Set the maximum page size
    #[must_use]
    pub fn with_max_limit(mut self, limit: u64) -> Self {
        self.max_limit = limit;
        self
    }

    /// Validate a raw limit and clamp it to `max_limit`.
    ///
    /// # Errors
    /// Returns `Error::InvalidLimit` if `limit` is zero or negative.
    pub fn validate_limit(&self, limit: i64) -> Result<u64, Error> {
        let requested = u64::try_from(limit)
            .ok()
            .filter(|l| *l > 0)
            .ok_or(Error::InvalidLimit(limit))?;
        Ok(self.clamp_limit(requested))
    }

    /// Clamp a page size to `max_limit`
    #[must_use]
    pub fn clamp_limit(&self, limit: u64) -> u64 {
        if limit > self.max_limit {
            tracing::debug!(
                requested = limit,
                max = self.max_limit,
                "clamping page size to configured maximum"
            );
            self.max_limit
        } else {
            limit
        }
    }
}
