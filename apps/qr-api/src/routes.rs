//! HTTP handlers.
//!
//! | Route          | Success              | Failure                          |
//! |----------------|----------------------|----------------------------------|
//! | `/api/qrcode`  | QR PNG of `data`     | `400`/`500` plain text           |
//! | `/api/payment` | QR PNG of EPC data   | PNG of the error message (`200`) |

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::de::value::{Error as ValueError, MapDeserializer};
use serde::Deserialize;
use sepa_core::{PaymentRequest, PaymentValidator};
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::render::{render_message_png, render_qr_png};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QrQuery {
    pub data: String,
}

/// `GET /api/qrcode?data=...`
pub async fn qr_code(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QrQuery>,
) -> Result<Response, ApiError> {
    if query.data.is_empty() {
        info!("Request with missing 'data' query parameter");
        return Err(ApiError::MissingParameter("data"));
    }

    let png = render_qr_png(&query.data, state.config.qr_size).map_err(ApiError::QrCode)?;
    Ok(png_response(png))
}

/// `GET /api/payment?method=sepa&iban=...`
pub async fn payment_qr_code(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let request = match query {
        Ok(Query(pairs)) => match payment_request(pairs) {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "Unreadable payment query string");
                return error_image(&state, "Invalid query string");
            }
        },
        Err(rejection) => {
            warn!(%rejection, "Unreadable payment query string");
            return error_image(&state, "Invalid query string");
        }
    };

    let payload = match PaymentValidator::new(&state.currencies).generate_payload(&request) {
        Ok(payload) => payload,
        Err(err) => return error_image(&state, &err.to_string()),
    };

    match render_qr_png(&payload, state.config.qr_size) {
        Ok(png) => {
            info!("QR Code generated successfully");
            Ok(png_response(png))
        }
        Err(err) => {
            error!(error = %err, "Failed to generate QR code");
            error_image(&state, "Failed to generate QR code")
        }
    }
}

/// Builds the request from raw query pairs; a repeated key keeps its first value.
fn payment_request(pairs: Vec<(String, String)>) -> Result<PaymentRequest, ValueError> {
    let mut seen = HashSet::new();
    let first = pairs.into_iter().filter(|(key, _)| seen.insert(key.clone()));
    let deserializer: MapDeserializer<'_, _, ValueError> = MapDeserializer::new(first);
    PaymentRequest::deserialize(deserializer)
}

fn error_image(state: &AppState, message: &str) -> Result<Response, ApiError> {
    let size = state.config.error_image_size;
    let png = render_message_png(message, size, size).map_err(ApiError::ErrorImage)?;
    Ok(png_response(png))
}

fn png_response(png: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "image/png")], png).into_response()
}
