//! HTTP error responses for page handlers

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

const ERROR_HTML: &str = include_str!("../../ui/error.html");

/// Failures that abort page rendering
///
/// Details are logged; the client only sees the generic error page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Session lookup failed: {0}")]
    SessionLookup(#[from] dash_common::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        error!("{}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_HTML)).into_response()
    }
}
