use apikit_errors::catalog;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

use crate::response::ApiResponse;

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let (status, body) = self.into_parts();
        let status = StatusCode::from_u16(status).unwrap_or_else(|_| {
            tracing::warn!(status, "invalid response status, sending 500");
            catalog::INTERNAL.status_code()
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::response::{build_success, no_items_found};
    use http::header;

    #[test]
    fn writes_status_and_json_body() {
        let response = no_items_found::<()>().into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn invalid_status_falls_back_to_500() {
        let response = build_success("ok", 1, None, 1000).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
