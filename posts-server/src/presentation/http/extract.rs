use axum::extract::FromRequest;

use crate::presentation::http::app_error::AppError;

/// `axum::Json` whose rejections render as a 400 `{error}` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub(crate) struct AppJson<T>(pub(crate) T);
