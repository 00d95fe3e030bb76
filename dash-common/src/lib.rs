//! # Dashboard Common Library
//!
//! Shared code for the dashboard services including:
//! - Session and user types consumed by server-rendered pages
//! - The `SessionService` contract and its adapters
//! - Configuration loading and root folder resolution
//! - Database connection and schema bootstrap

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod session;

pub use error::{Error, Result};
pub use session::{Session, SessionService, User};
