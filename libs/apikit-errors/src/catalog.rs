//! Error catalog support (`ErrDef`) and the entries shared by the apikit crates.

use crate::detail::ErrorDetail;
use http::StatusCode;

/// Static error definition from catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
}

impl ErrDef {
    /// Convert this error definition into an `ErrorDetail` with the given message
    #[inline]
    pub fn as_detail(&self, message: impl Into<String>) -> ErrorDetail {
        ErrorDetail::new(message).with_code(self.code)
    }

    /// Status as `StatusCode`, using `INTERNAL_SERVER_ERROR` as fallback for invalid codes
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Zero or negative page/limit, malformed request parameter.
pub const INVALID_ARGUMENT: ErrDef = ErrDef {
    status: 400,
    title: "Invalid Argument",
    code: "INVALID_ARGUMENT",
};

/// Filter payload that cannot be interpreted for its operator.
pub const INVALID_FILTER: ErrDef = ErrDef {
    status: 400,
    title: "Invalid Filter",
    code: "INVALID_FILTER",
};

/// Empty result set surfaced to the user.
pub const NOT_FOUND: ErrDef = ErrDef {
    status: 404,
    title: "Not Found",
    code: "NOT_FOUND",
};

pub const INTERNAL: ErrDef = ErrDef {
    status: 500,
    title: "Internal Server Error",
    code: "INTERNAL",
};
