//! OS keychain token store

use async_trait::async_trait;
use keyring::Entry;
use nexuspulse_core::{StoredSession, TokenStore};
use nexuspulse_domain::{NexusPulseError, Result, User};
use tracing::{debug, warn};

/// Default keychain service name
const DEFAULT_SERVICE: &str = "NexusPulse";

/// Entry holding the backend-issued JWT access token
const ACCESS_TOKEN_ENTRY: &str = "jwt_token";
/// Entry holding the cached user profile as JSON
const USER_ENTRY: &str = "user";
/// Entry holding the identity provider refresh token
const REFRESH_TOKEN_ENTRY: &str = "refresh_token";

/// Token store backed by the OS keychain.
///
/// The session is persisted as three entries under one service name. The
/// entry names are load-bearing: they match what previous releases wrote,
/// so existing sessions survive an upgrade.
pub struct KeyringTokenStore {
    service: String,
}

impl KeyringTokenStore {
    /// Create a store under the default service name
    #[must_use]
    pub fn new() -> Self {
        Self::with_service(DEFAULT_SERVICE)
    }

    /// Create a store under a custom service name
    #[must_use]
    pub fn with_service(service: impl Into<String>) -> Self {
        Self { service: service.into() }
    }

    fn entry(&self, name: &str) -> Result<Entry> {
        Entry::new(&self.service, name)
            .map_err(|e| NexusPulseError::Storage(format!("Keychain entry {name}: {e}")))
    }

    fn read_entry(&self, name: &str) -> Result<Option<String>> {
        match self.entry(name)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(NexusPulseError::Storage(format!("Keychain read {name}: {e}"))),
        }
    }

    fn write_entry(&self, name: &str, value: &str) -> Result<()> {
        self.entry(name)?
            .set_password(value)
            .map_err(|e| NexusPulseError::Storage(format!("Keychain write {name}: {e}")))
    }

    fn delete_entry(&self, name: &str) -> Result<()> {
        match self.entry(name)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(NexusPulseError::Storage(format!("Keychain delete {name}: {e}"))),
        }
    }
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for KeyringTokenStore {
    async fn load(&self) -> Result<Option<StoredSession>> {
        let Some(access_token) = self.read_entry(ACCESS_TOKEN_ENTRY)? else {
            return Ok(None);
        };

        let Some(user_json) = self.read_entry(USER_ENTRY)? else {
            // A token without a profile is not a usable session.
            debug!("Access token present but no cached user; treating as absent");
            return Ok(None);
        };

        let user: User = match serde_json::from_str(&user_json) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Cached user profile is corrupted; discarding session");
                return Ok(None);
            }
        };

        let refresh_token = self.read_entry(REFRESH_TOKEN_ENTRY)?;

        Ok(Some(StoredSession { access_token, refresh_token, user }))
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        let user_json = serde_json::to_string(&session.user)
            .map_err(|e| NexusPulseError::Storage(format!("Serialize user profile: {e}")))?;

        self.write_entry(ACCESS_TOKEN_ENTRY, &session.access_token)?;
        self.write_entry(USER_ENTRY, &user_json)?;

        match &session.refresh_token {
            Some(token) => self.write_entry(REFRESH_TOKEN_ENTRY, token)?,
            None => self.delete_entry(REFRESH_TOKEN_ENTRY)?,
        }

        debug!("Session persisted to keychain");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.delete_entry(ACCESS_TOKEN_ENTRY)?;
        self.delete_entry(USER_ENTRY)?;
        self.delete_entry(REFRESH_TOKEN_ENTRY)?;

        debug!("Session cleared from keychain");
        Ok(())
    }
}

impl std::fmt::Debug for KeyringTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyringTokenStore").field("service", &self.service).finish()
    }
}
