//! Authentication module for PLAYVAULT.
//!
//! This module provides the credential registry, the session manager,
//! and the salted password-hashing primitives.

mod credentials;
mod password;
mod session;

pub use credentials::{
    profile_key, AuthError, CredentialStore, RegisterError, UserRecord, USERS_KEY,
};
pub use password::{
    constant_time_eq, generate_salt, hash_password, PasswordError, HASH_LEN, SALT_LEN,
};
pub use session::{ObserverId, SessionEvent, SessionManager};
