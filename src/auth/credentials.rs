//! Durable credential registry for PLAYVAULT.
//!
//! [`CredentialStore`] owns the persisted list of registered accounts and
//! the register/authenticate/exists operations. The whole set lives in one
//! `"users"` slot, loaded once at construction and rewritten after every
//! successful registration.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{constant_time_eq, generate_salt, hash_password, PasswordError};
use crate::datetime;
use crate::player::PlayerProfile;
use crate::store::{SlotStore, StorageError};

/// Slot key holding the full registered-user set.
pub const USERS_KEY: &str = "users";

/// Slot key for a player's save profile.
pub fn profile_key(player_id: &str) -> String {
    format!("player_{player_id}")
}

/// Registration errors.
#[derive(Error, Debug)]
pub enum RegisterError {
    /// Username (after trimming) or password is empty.
    #[error("username and password are required")]
    InvalidInput,

    /// The username is already registered (case-insensitive).
    #[error("username already taken")]
    UsernameTaken,

    /// Password hashing failed.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// The durable store could not be written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No account with that username.
    #[error("user '{0}' not found")]
    UserNotFound(String),

    /// The password does not match.
    #[error("invalid password")]
    InvalidPassword,

    /// Password hashing failed.
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// One registered account.
///
/// Salt and hash are immutable after creation; the salt is unique per
/// account and the hash is the Argon2id digest of the password keyed by
/// it. Both are stored base64-encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Login name, unique case-insensitively; stored as registered.
    pub username: String,
    /// Per-account random salt.
    #[serde(with = "base64_bytes")]
    pub salt: Vec<u8>,
    /// Digest of the password keyed by `salt`.
    #[serde(with = "base64_bytes")]
    pub password_hash: Vec<u8>,
    /// RFC3339 UTC registration timestamp, informational only.
    pub created_at: String,
    /// Stable id keying this account's save profile. Never reused.
    pub player_id: String,
}

/// Durable registry of accounts and password verification.
#[derive(Debug)]
pub struct CredentialStore {
    store: SlotStore,
    users: Vec<UserRecord>,
}

impl CredentialStore {
    /// Open the registry, loading the `"users"` slot.
    ///
    /// A missing slot yields an empty registry; unreadable data is an
    /// error, never treated as "no users".
    pub fn open(store: SlotStore) -> Result<Self, StorageError> {
        let users: Vec<UserRecord> = store.load(USERS_KEY)?.unwrap_or_default();
        info!("Loaded {} registered accounts", users.len());
        Ok(Self { store, users })
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no accounts are registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Case-insensitive existence check. No side effects.
    pub fn exists(&self, username: &str) -> bool {
        self.find(username).is_some()
    }

    fn find(&self, username: &str) -> Option<&UserRecord> {
        let needle = username.to_lowercase();
        self.users.iter().find(|u| u.username.to_lowercase() == needle)
    }

    /// Register a new account and seed its default save profile.
    ///
    /// The username is trimmed before validation and stored in its
    /// original case. On success the new record is appended and the full
    /// set is persisted before returning.
    pub fn register(&mut self, username: &str, password: &str) -> Result<UserRecord, RegisterError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(RegisterError::InvalidInput);
        }
        if self.exists(username) {
            return Err(RegisterError::UsernameTaken);
        }

        let salt = generate_salt();
        let hash = hash_password(password, &salt)?;
        let player_id = Uuid::new_v4().to_string();

        let record = UserRecord {
            username: username.to_string(),
            salt: salt.to_vec(),
            password_hash: hash.to_vec(),
            created_at: datetime::now_rfc3339(),
            player_id: player_id.clone(),
        };

        // Seed the profile before persisting the user set: a registration
        // that fails halfway must never leave an authenticatable account.
        let profile = PlayerProfile::for_player(&player_id, username);
        self.store.save(&profile_key(&player_id), &profile)?;

        self.users.push(record.clone());
        if let Err(e) = self.persist() {
            self.users.pop();
            return Err(e.into());
        }

        info!(
            "Registered account '{}' (player {})",
            record.username, record.player_id
        );
        Ok(record)
    }

    /// Authenticate by username (case-insensitive) and password.
    ///
    /// The digest comparison is constant-time so a mismatch leaks nothing
    /// about where the hashes diverge.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<UserRecord, AuthError> {
        let record = self
            .find(username)
            .ok_or_else(|| AuthError::UserNotFound(username.to_string()))?;

        let candidate = hash_password(password, &record.salt)?;
        if !constant_time_eq(&candidate, &record.password_hash) {
            warn!("Failed login attempt for '{}'", record.username);
            return Err(AuthError::InvalidPassword);
        }

        Ok(record.clone())
    }

    /// The slot store backing this registry.
    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.save(USERS_KEY, &self.users)
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
