//! dash-settings library - account settings page
//!
//! Server-rendered settings page of the dashboard. Session resolution is
//! delegated to a [`SessionService`]; this crate only decides between
//! redirecting to sign-in and rendering the settings form.

use std::sync::Arc;

use axum::Router;
use dash_common::SessionService;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod page;
pub mod view;

/// Module name used for config lookup and health reporting
pub const MODULE_NAME: &str = "dash-settings";

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolves the session attached to each request
    pub sessions: Arc<dyn SessionService>,
}

impl AppState {
    /// Create new application state
    pub fn new(sessions: Arc<dyn SessionService>) -> Self {
        Self { sessions }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/settings", get(api::get_settings))
        .route("/static/settings.css", get(api::serve_settings_css))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
