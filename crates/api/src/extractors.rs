//! Request extractors.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON body extractor whose rejections render as `ApiError`.
///
/// Malformed JSON, unknown shapes and out-of-range amounts all come back as
/// a 400 `VALIDATION_ERROR` body instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
