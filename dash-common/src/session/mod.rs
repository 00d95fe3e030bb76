//! Session and user types plus the session resolution contract
//!
//! Pages never decide how a session is issued or stored. They hand the
//! request headers to a [`SessionService`] and branch on what comes back.
//!
//! # Adapters
//!
//! - [`MemorySessionStore`]: in-process token map for development and tests
//! - [`SqliteSessionStore`]: read-only lookup against the shared database

use async_trait::async_trait;
use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

mod memory;
#[cfg(feature = "sqlx")]
mod sqlite;
mod token;

pub use memory::MemorySessionStore;
#[cfg(feature = "sqlx")]
pub use sqlite::SqliteSessionStore;
pub use token::{extract_token, hash_token};

/// Authenticated user as seen by dashboard pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            image: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// A blank id does not identify anyone
    pub fn has_identity(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

/// Server-side record asserting a request is authenticated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user: Option<User>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>, user: Option<User>, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            user,
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// The session's user, if it carries a usable identity
    pub fn authenticated_user(&self) -> Option<&User> {
        self.user.as_ref().filter(|user| user.has_identity())
    }
}

/// Resolves the session attached to a request
///
/// Returns `Ok(None)` when the request carries no valid session. `Err` is
/// reserved for failures of the lookup itself (database down, corrupt row).
#[async_trait]
pub trait SessionService: Send + Sync {
    async fn get_session(&self, headers: &HeaderMap) -> Result<Option<Session>>;
}
