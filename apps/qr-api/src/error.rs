//! Error types for the QR API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::render::RenderError;

/// QR API errors.
///
/// Payment validation failures are not errors at this level: they are
/// rendered into an image and returned with `200 OK`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing '{0}' query parameter")]
    MissingParameter(&'static str),

    #[error("Failed to generate QR code")]
    QrCode(#[source] RenderError),

    #[error("Failed to encode image")]
    ErrorImage(#[source] RenderError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::QrCode(_) | ApiError::ErrorImage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::QrCode(source) | ApiError::ErrorImage(source) => {
                error!(error = %source, "{self}");
            }
            ApiError::MissingParameter(_) => {}
        }
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::MissingParameter("data");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Missing 'data' query parameter");

        let source = crate::render::render_qr_png(&"x".repeat(4000), 64).unwrap_err();
        let err = ApiError::QrCode(source);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
