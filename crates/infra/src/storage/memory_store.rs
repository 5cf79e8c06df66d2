//! In-memory token store

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use nexuspulse_core::{StoredSession, TokenStore};
use nexuspulse_domain::{NexusPulseError, Result, User};
use tracing::warn;

const ACCESS_TOKEN_KEY: &str = "jwt_token";
const USER_KEY: &str = "user";
const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Token store backed by a process-local map.
///
/// Stores the same three string entries the keychain adapter does, so tests
/// exercise the identical serialization path. Sessions do not survive a
/// process restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw entry, bypassing session serialization.
    ///
    /// Lets tests stage malformed or partial state.
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| NexusPulseError::Storage("Token store lock poisoned".to_string()))
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<StoredSession>> {
        let entries = self.locked()?;

        let Some(access_token) = entries.get(ACCESS_TOKEN_KEY).cloned() else {
            return Ok(None);
        };
        let Some(user_json) = entries.get(USER_KEY) else {
            return Ok(None);
        };

        let user: User = match serde_json::from_str(user_json) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Cached user profile is corrupted; discarding session");
                return Ok(None);
            }
        };

        let refresh_token = entries.get(REFRESH_TOKEN_KEY).cloned();

        Ok(Some(StoredSession { access_token, refresh_token, user }))
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        let user_json = serde_json::to_string(&session.user)
            .map_err(|e| NexusPulseError::Storage(format!("Serialize user profile: {e}")))?;

        let mut entries = self.locked()?;
        entries.insert(ACCESS_TOKEN_KEY.to_string(), session.access_token.clone());
        entries.insert(USER_KEY.to_string(), user_json);
        match &session.refresh_token {
            Some(token) => {
                entries.insert(REFRESH_TOKEN_KEY.to_string(), token.clone());
            }
            None => {
                entries.remove(REFRESH_TOKEN_KEY);
            }
        }

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut entries = self.locked()?;
        entries.remove(ACCESS_TOKEN_KEY);
        entries.remove(USER_KEY);
        entries.remove(REFRESH_TOKEN_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use nexuspulse_domain::Role;

    use super::*;

    fn sample_user() -> User {
        let now = "2024-03-01T09:00:00Z".parse().unwrap();
        User {
            id: "u-1".to_string(),
            email: "jamie@nexuspulse.dev".to_string(),
            first_name: "Jamie".to_string(),
            last_name: "Reyes".to_string(),
            full_name: "Jamie Reyes".to_string(),
            role: Role::Employee,
            manager_id: None,
            location_id: "loc-1".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn load_on_empty_store_returns_none() {
        let store = MemoryTokenStore::new();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = MemoryTokenStore::new();
        let session = StoredSession {
            access_token: "abc".to_string(),
            refresh_token: Some("r1".to_string()),
            user: sample_user(),
        };

        store.save(&session).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();

        assert_eq!(loaded.access_token, "abc");
        assert_eq!(loaded.refresh_token.as_deref(), Some("r1"));
        assert_eq!(loaded.user, session.user);
    }

    #[tokio::test]
    async fn corrupted_user_entry_reads_as_absent() {
        let store = MemoryTokenStore::new();
        store.insert_raw("jwt_token", "abc");
        store.insert_raw("user", "{not json");

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn token_without_user_reads_as_absent() {
        let store = MemoryTokenStore::new();
        store.insert_raw("jwt_token", "abc");

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_without_refresh_token_removes_stale_entry() {
        let store = MemoryTokenStore::new();
        let with_refresh = StoredSession {
            access_token: "abc".to_string(),
            refresh_token: Some("r1".to_string()),
            user: sample_user(),
        };
        let without_refresh =
            StoredSession { refresh_token: None, ..with_refresh.clone() };

        store.save(&with_refresh).await.unwrap();
        store.save(&without_refresh).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert!(loaded.refresh_token.is_none());
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let store = MemoryTokenStore::new();
        let session = StoredSession {
            access_token: "abc".to_string(),
            refresh_token: Some("r1".to_string()),
            user: sample_user(),
        };
        store.save(&session).await.unwrap();

        store.clear().await.unwrap();

        assert!(store.load().await.unwrap().is_none());
    }
}
