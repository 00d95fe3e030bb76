//! Settings page request handling
//!
//! Framework-independent core of `GET /settings`. The caller passes the
//! request headers in and receives either a redirect target or a view to
//! render; performing the navigation is left to the HTTP adapter.

use axum::http::HeaderMap;
use dash_common::{Result, SessionService};
use tracing::debug;

use crate::view::{PageHeader, SettingsForm, SettingsView};

/// Where unauthenticated visitors are sent
pub const SIGN_IN_PATH: &str = "/sign-in";

pub const PAGE_TITLE: &str = "Settings";
pub const PAGE_DESCRIPTION: &str = "Manage your account settings";

/// Result of handling a settings page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Navigate the client to this path instead of rendering
    Redirect(String),
    /// Render this view
    Render(SettingsView),
}

/// Resolve the caller's session and decide between redirect and render
///
/// Performs exactly one session lookup. A missing session, or one without a
/// user identity, yields [`PageOutcome::Redirect`] to [`SIGN_IN_PATH`].
///
/// # Errors
///
/// Any session service failure is returned unchanged.
pub async fn settings_page(
    sessions: &dyn SessionService,
    headers: &HeaderMap,
) -> Result<PageOutcome> {
    let session = sessions.get_session(headers).await?;

    let Some(user) = session.as_ref().and_then(|s| s.authenticated_user()) else {
        debug!(
            session_present = session.is_some(),
            "No authenticated user, redirecting to {}", SIGN_IN_PATH
        );
        return Ok(PageOutcome::Redirect(SIGN_IN_PATH.to_string()));
    };

    Ok(PageOutcome::Render(SettingsView {
        header: PageHeader {
            title: PAGE_TITLE.to_string(),
            description: PAGE_DESCRIPTION.to_string(),
        },
        form: SettingsForm { user: user.clone() },
    }))
}
