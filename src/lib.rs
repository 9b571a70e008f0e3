//! PLAYVAULT - Local player accounts and save profiles for an action-RPG client.
//!
//! Registers and authenticates players against a file-backed credential
//! store using per-account salted password hashing, manages the single
//! current-session identity with login/logout notifications, and persists
//! each player's save profile keyed by a stable player id.

pub mod auth;
pub mod config;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod player;
pub mod store;

pub use auth::{
    constant_time_eq, generate_salt, hash_password, profile_key, AuthError, CredentialStore,
    ObserverId, PasswordError, RegisterError, SessionEvent, SessionManager, UserRecord, USERS_KEY,
};
pub use config::Config;
pub use error::{Result, VaultError};
pub use player::PlayerProfile;
pub use store::{SlotStore, StorageError};
