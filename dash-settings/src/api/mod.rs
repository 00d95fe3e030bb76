//! HTTP API handlers for dash-settings

pub mod buildinfo;
pub mod error;
pub mod health;
pub mod settings;
pub mod ui;

pub use buildinfo::get_build_info;
pub use error::PageError;
pub use health::health_routes;
pub use settings::get_settings;
pub use ui::serve_settings_css;
