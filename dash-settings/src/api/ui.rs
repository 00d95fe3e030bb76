//! Static asset routes

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

const SETTINGS_CSS: &str = include_str!("../../ui/settings.css");

/// GET /static/settings.css
///
/// Serves the stylesheet for the page layout
pub async fn serve_settings_css() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        SETTINGS_CSS,
    )
        .into_response()
}
