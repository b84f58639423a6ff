//! Mapping from query errors to the error catalog (pure data)
//!
//! The response layer in `apikit` turns the resulting `ErrDef` and
//! `ErrorDetail` into an error envelope.

use apikit_errors::{ErrDef, ErrorDetail, catalog};

use crate::Error;

impl Error {
    /// Catalog entry for this error.
    #[must_use]
    pub fn err_def(&self) -> ErrDef {
        match self {
            Error::InvalidPage(_) | Error::InvalidLimit(_) | Error::InvalidSort(_) => {
                catalog::INVALID_ARGUMENT
            }
            Error::InvalidFilter { .. } => catalog::INVALID_FILTER,
        }
    }

    /// Request parameter the error refers to.
    #[must_use]
    pub fn field(&self) -> String {
        match self {
            Error::InvalidPage(_) => "page".to_owned(),
            Error::InvalidLimit(_) => "limit".to_owned(),
            Error::InvalidSort(_) => "sort".to_owned(),
            Error::InvalidFilter { field, .. } => format!("filters.{field}"),
        }
    }

    /// Envelope error detail for this error.
    pub fn to_detail(&self) -> ErrorDetail {
        self.err_def()
            .as_detail(self.to_string())
            .with_field(self.field())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn limit_error_converts_to_detail() {
        let detail = Error::InvalidLimit(0).to_detail();

        assert_eq!(detail.field.as_deref(), Some("limit"));
        assert_eq!(detail.code.as_deref(), Some("INVALID_ARGUMENT"));
        assert!(detail.message.contains("limit must be at least 1"));
    }

    #[test]
    fn filter_error_converts_to_detail() {
        let err = Error::invalid_filter("createdAt", "'between' requires 'first'");
        assert_eq!(err.err_def().status, 400);

        let detail = err.to_detail();
        assert_eq!(detail.field.as_deref(), Some("filters.createdAt"));
        assert_eq!(detail.code.as_deref(), Some("INVALID_FILTER"));
    }

    #[test]
    fn page_error_uses_invalid_argument() {
        assert_eq!(Error::InvalidPage(-1).err_def(), catalog::INVALID_ARGUMENT);
        assert_eq!(Error::InvalidPage(-1).field(), "page");
    }
}
