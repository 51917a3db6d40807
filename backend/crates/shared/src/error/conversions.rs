//! Error conversions - From implementations and HTTP rendering
//!
//! Provides conversions from common error types to [`AppError`] and, with
//! the `axum` feature, the JSON response every error is rendered as.

use super::app_error::AppError;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_request("Malformed JSON body").with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

#[cfg(feature = "axum")]
mod http_rendering {
    use axum::Json;
    use axum::extract::rejection::JsonRejection;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde::Serialize;

    use super::AppError;

    /// Wire body: `{"message": "..."}`
    #[derive(Serialize)]
    struct ErrorBody<'a> {
        message: &'a str,
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            let body = ErrorBody {
                message: self.message(),
            };

            (status, Json(body)).into_response()
        }
    }

    /// Body that is not JSON, or does not match the request schema
    impl From<JsonRejection> for AppError {
        fn from(rejection: JsonRejection) -> Self {
            let message = match &rejection {
                JsonRejection::MissingJsonContentType(_) => {
                    "Expected request with `Content-Type: application/json`"
                }
                JsonRejection::JsonSyntaxError(_) => "Malformed JSON body",
                JsonRejection::JsonDataError(_) => "Request body does not match the expected schema",
                _ => "Unreadable request body",
            };
            AppError::bad_request(message).with_source(rejection)
        }
    }
}
