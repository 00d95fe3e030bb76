//! In-process session store

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::HeaderMap;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{extract_token, hash_token, Session, SessionService};
use crate::config::DEFAULT_SESSION_COOKIE;
use crate::Result;

/// Session store keyed by token digest
///
/// Used for local development and tests. Sessions are inserted by the
/// caller; this store never issues tokens on its own.
pub struct MemorySessionStore {
    cookie_name: String,
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a session under the given raw token
    pub async fn insert(&self, token: &str, session: Session) {
        self.sessions.write().await.insert(hash_token(token), session);
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE)
    }
}

#[async_trait]
impl SessionService for MemorySessionStore {
    async fn get_session(&self, headers: &HeaderMap) -> Result<Option<Session>> {
        let Some(token) = extract_token(headers, &self.cookie_name) else {
            return Ok(None);
        };

        let sessions = self.sessions.read().await;
        let session = sessions
            .get(&hash_token(&token))
            .filter(|session| !session.is_expired_at(Utc::now()))
            .cloned();

        if session.is_none() {
            debug!("No live session for presented token");
        }
        Ok(session)
    }
}
