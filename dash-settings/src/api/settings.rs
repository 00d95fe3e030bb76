//! Settings page route
//!
//! Adapts [`crate::page::settings_page`] to axum: the redirect outcome
//! becomes a 307 to the sign-in path, the render outcome an HTML response.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
};

use super::PageError;
use crate::page::{settings_page, PageOutcome};
use crate::AppState;

/// GET /settings
///
/// Serves the account settings page for the session's user.
pub async fn get_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let response = match settings_page(state.sessions.as_ref(), &headers).await? {
        PageOutcome::Redirect(path) => Redirect::temporary(&path).into_response(),
        PageOutcome::Render(view) => (
            [(header::CACHE_CONTROL, "no-store")],
            Html(view.render_html()),
        )
            .into_response(),
    };

    Ok(response)
}
