//! Standard JSON response envelope and its builders.
//!
//! Every response body has the same shape:
//!
//! ```json
//! {
//!   "hasError": false,
//!   "additionalErrors": [],
//!   "message": "Users",
//!   "result": { "data": [], "pagination": {} },
//!   "redirect": ""
//! }
//! ```
//!
//! Envelopes are built once and never mutated, fields are only readable
//! through accessors.

use apikit_errors::{ErrorDetail, catalog};
use apikit_query::PaginationMeta;
use serde::{Deserialize, Serialize};

/// Message of the "no items found" business outcome.
pub const NO_ITEMS_FOUND: &str = "No items found";

/// Response body shared by success, error and redirect responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    has_error: bool,
    additional_errors: Vec<ErrorDetail>,
    message: String,
    result: Option<EnvelopeResult<T>>,
    redirect: String,
}

/// `result` member of an envelope. Missing pagination is written as `{}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeResult<T> {
    pub data: T,
    #[serde(with = "pagination_or_empty")]
    pub pagination: Option<PaginationMeta>,
}

impl<T> EnvelopeResult<T> {
    fn new(data: T, pagination: Option<PaginationMeta>) -> Self {
        Self { data, pagination }
    }
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn additional_errors(&self) -> &[ErrorDetail] {
        &self.additional_errors
    }

    #[must_use]
    pub fn result(&self) -> Option<&EnvelopeResult<T>> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.result.as_ref().map(|r| &r.data)
    }

    #[must_use]
    pub fn pagination(&self) -> Option<&PaginationMeta> {
        self.result.as_ref().and_then(|r| r.pagination.as_ref())
    }

    #[must_use]
    pub fn redirect(&self) -> &str {
        &self.redirect
    }

    /// Consume the envelope and return its payload, if any.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.result.map(|r| r.data)
    }
}

/// Envelope paired with the HTTP status it is sent with.
///
/// The status is taken as given, it is not checked against the HTTP status
/// space until the response is actually written.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct ApiResponse<T> {
    status: u16,
    body: Envelope<T>,
}

impl<T> ApiResponse<T> {
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    #[must_use]
    pub fn body(&self) -> &Envelope<T> {
        &self.body
    }

    #[must_use]
    pub fn into_body(self) -> Envelope<T> {
        self.body
    }

    #[must_use]
    pub fn into_parts(self) -> (u16, Envelope<T>) {
        (self.status, self.body)
    }
}

impl<T> From<apikit_query::Error> for ApiResponse<T> {
    fn from(err: apikit_query::Error) -> Self {
        from_query_error(&err)
    }
}

/// Successful response carrying `data` and, for lists, its pagination.
pub fn build_success<T>(
    message: impl Into<String>,
    data: T,
    pagination: Option<PaginationMeta>,
    status: u16,
) -> ApiResponse<T> {
    ApiResponse {
        status,
        body: Envelope {
            has_error: false,
            additional_errors: Vec::new(),
            message: message.into(),
            result: Some(EnvelopeResult::new(data, pagination)),
            redirect: String::new(),
        },
    }
}

/// Error response: `hasError` is set and `result` is `null`.
pub fn build_error<T>(
    message: impl Into<String>,
    additional_errors: Vec<ErrorDetail>,
    status: u16,
) -> ApiResponse<T> {
    ApiResponse {
        status,
        body: Envelope {
            has_error: true,
            additional_errors,
            message: message.into(),
            result: None,
            redirect: String::new(),
        },
    }
}

/// Redirect response pointing to `redirect_url`.
///
/// `data` only ends up in `result` when it is truthy: `null`, `false`, `0`,
/// `""`, `"0"`, `[]` and `{}` leave `result` as `null`.
pub fn build_redirect<T: Serialize>(
    message: impl Into<String>,
    redirect_url: impl Into<String>,
    data: Option<T>,
    status: u16,
) -> ApiResponse<T> {
    let result = data
        .filter(is_truthy)
        .map(|d| EnvelopeResult::new(d, None));

    ApiResponse {
        status,
        body: Envelope {
            has_error: false,
            additional_errors: Vec::new(),
            message: message.into(),
            result,
            redirect: redirect_url.into(),
        },
    }
}

/// [`build_success`] with status 200.
pub fn success<T>(
    message: impl Into<String>,
    data: T,
    pagination: Option<PaginationMeta>,
) -> ApiResponse<T> {
    build_success(message, data, pagination, 200)
}

/// [`build_error`] with status 400.
pub fn error<T>(message: impl Into<String>, additional_errors: Vec<ErrorDetail>) -> ApiResponse<T> {
    build_error(message, additional_errors, 400)
}

/// [`build_redirect`] with status 302.
pub fn redirect<T: Serialize>(
    message: impl Into<String>,
    redirect_url: impl Into<String>,
    data: Option<T>,
) -> ApiResponse<T> {
    build_redirect(message, redirect_url, data, 302)
}

/// Empty result set reported to the caller as a 404 error envelope.
pub fn not_found<T>(message: impl Into<String>) -> ApiResponse<T> {
    let message = message.into();
    let detail = catalog::NOT_FOUND.as_detail(message.clone());
    build_error(message, vec![detail], catalog::NOT_FOUND.status)
}

/// [`not_found`] with the default message.
pub fn no_items_found<T>() -> ApiResponse<T> {
    not_found(NO_ITEMS_FOUND)
}

/// Error envelope for a rejected list request (bad page, limit, filter or sort).
pub fn from_query_error<T>(err: &apikit_query::Error) -> ApiResponse<T> {
    let def = err.err_def();
    tracing::debug!(error = %err, code = def.code, "list request rejected");
    build_error(def.title, vec![err.to_detail()], def.status)
}

fn is_truthy<T: Serialize>(data: &T) -> bool {
    use serde_json::Value;

    match serde_json::to_value(data) {
        Ok(Value::Null) => false,
        Ok(Value::Bool(b)) => b,
        Ok(Value::Number(n)) => n.as_f64().is_none_or(|f| f.abs() > 0.0),
        Ok(Value::String(s)) => !(s.is_empty() || s == "0"),
        Ok(Value::Array(items)) => !items.is_empty(),
        Ok(Value::Object(map)) => !map.is_empty(),
        Err(e) => {
            tracing::debug!(error = %e, "redirect data is not serializable, keeping it");
            true
        }
    }
}

mod pagination_or_empty {
    use apikit_query::PaginationMeta;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Meta(PaginationMeta),
        Empty(serde_json::Map<String, serde_json::Value>),
    }

    // serde's `with` hands the field over by reference
    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<PaginationMeta>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(meta) => meta.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<PaginationMeta>, D::Error> {
        match Wire::deserialize(deserializer)? {
            Wire::Meta(meta) => Ok(Some(meta)),
            Wire::Empty(map) if map.is_empty() => Ok(None),
            Wire::Empty(_) => Err(serde::de::Error::custom(
                "pagination must be empty or complete pagination metadata",
            )),
        }
    }
}
