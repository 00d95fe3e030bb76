//! Session lookup against the shared database

use async_trait::async_trait;
use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use super::{extract_token, hash_token, Session, SessionService, User};
use crate::Result;

type SessionRow = (
    String,
    DateTime<Utc>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

/// Read-only [`SessionService`] backed by the `sessions` and `users` tables
#[derive(Clone)]
pub struct SqliteSessionStore {
    db: SqlitePool,
    cookie_name: String,
}

impl SqliteSessionStore {
    pub fn new(db: SqlitePool, cookie_name: impl Into<String>) -> Self {
        Self {
            db,
            cookie_name: cookie_name.into(),
        }
    }

    /// Look up a session by raw token, ignoring expiry
    pub async fn find_by_token(&self, token: &str) -> Result<Option<Session>> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT s.id, s.expires_at, u.id, u.name, u.email, u.image
            FROM sessions s
            LEFT JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = ?
            "#,
        )
        .bind(hash_token(token))
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(|(id, expires_at, user_id, name, email, image)| {
            let user = user_id.map(|user_id| User {
                id: user_id,
                name: name.unwrap_or_default(),
                email,
                image,
            });
            Session::new(id, user, expires_at)
        }))
    }
}

#[async_trait]
impl SessionService for SqliteSessionStore {
    async fn get_session(&self, headers: &HeaderMap) -> Result<Option<Session>> {
        let Some(token) = extract_token(headers, &self.cookie_name) else {
            return Ok(None);
        };

        match self.find_by_token(&token).await? {
            Some(session) if session.is_expired_at(Utc::now()) => {
                debug!("Session {} expired at {}", session.id, session.expires_at);
                Ok(None)
            }
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use axum::http::{header, HeaderValue};
    use chrono::Duration;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_store() -> SqliteSessionStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();

        sqlx::query("INSERT INTO users (id, name, email) VALUES ('u1', 'Ann', 'ann@example.com')")
            .execute(&pool)
            .await
            .unwrap();

        SqliteSessionStore::new(pool, "session_token")
    }

    async fn add_session(store: &SqliteSessionStore, id: &str, token: &str, user_id: Option<&str>, expires_at: DateTime<Utc>) {
        sqlx::query("INSERT INTO sessions (id, token_hash, user_id, expires_at) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(hash_token(token))
            .bind(user_id)
            .bind(expires_at)
            .execute(&store.db)
            .await
            .unwrap();
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_live_session_with_user() {
        let store = setup_store().await;
        add_session(&store, "s1", "tok", Some("u1"), Utc::now() + Duration::hours(1)).await;

        let session = store.get_session(&bearer("tok")).await.unwrap().unwrap();
        assert_eq!(session.id, "s1");
        assert_eq!(
            session.user,
            Some(User::new("u1", "Ann").with_email("ann@example.com"))
        );
    }

    #[tokio::test]
    async fn test_dangling_user_resolves_to_userless_session() {
        let store = setup_store().await;
        add_session(&store, "s2", "orphan", Some("deleted-user"), Utc::now() + Duration::hours(1)).await;

        let session = store.get_session(&bearer("orphan")).await.unwrap().unwrap();
        assert!(session.user.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_none() {
        let store = setup_store().await;
        add_session(&store, "s3", "stale", Some("u1"), Utc::now() - Duration::hours(1)).await;

        assert!(store.get_session(&bearer("stale")).await.unwrap().is_none());
        // Still visible to a direct lookup
        assert!(store.find_by_token("stale").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unknown_token_and_no_token() {
        let store = setup_store().await;
        assert!(store.get_session(&bearer("missing")).await.unwrap().is_none());
        assert!(store.get_session(&HeaderMap::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_database_failure_propagates() {
        let store = setup_store().await;
        sqlx::query("DROP TABLE sessions")
            .execute(&store.db)
            .await
            .unwrap();

        let result = store.get_session(&bearer("tok")).await;
        assert!(matches!(result, Err(crate::Error::Database(_))));
    }
}
