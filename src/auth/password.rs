//! Password hashing primitives for PLAYVAULT.
//!
//! Each account carries its own random salt; the stored hash is the raw
//! Argon2id digest of the password keyed by that salt. Verification
//! recomputes the digest and compares it in constant time.

use argon2::{Argon2, Params};
use rand_core::{OsRng, RngCore};
use thiserror::Error;

/// Length of the per-account random salt in bytes.
pub const SALT_LEN: usize = 16;

/// Length of the password digest in bytes.
pub const HASH_LEN: usize = 32;

/// Password-hashing errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// The underlying hash function rejected its input.
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Create the Argon2 hasher with recommended parameters.
///
/// Parameters:
/// - Memory cost: 64 MB (65536 KiB)
/// - Time cost: 3 iterations
/// - Parallelism: 4 threads
fn create_argon2() -> Argon2<'static> {
    let m_cost = 65536;
    let t_cost = 3;
    let p_cost = 4;

    let params = Params::new(m_cost, t_cost, p_cost, Some(HASH_LEN)).expect("valid Argon2 params");
    Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
}

/// Generate a fresh cryptographically random salt.
///
/// Called once per account at registration; the salt is stored alongside
/// the hash and never changes afterwards.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Compute the digest of `password` keyed by `salt`.
pub fn hash_password(password: &str, salt: &[u8]) -> Result<[u8; HASH_LEN], PasswordError> {
    let mut out = [0u8; HASH_LEN];
    create_argon2()
        .hash_password_into(password.as_bytes(), salt, &mut out)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;
    Ok(out)
}

/// Compare two byte sequences in constant time.
///
/// Iterates every byte and XOR-accumulates the differences so the running
/// time does not depend on where the first mismatch occurs. Lengths are
/// public, so a length mismatch may return early.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_salt_length() {
        let salt = generate_salt();
        assert_eq!(salt.len(), SALT_LEN);
    }

    #[test]
    fn test_generate_salt_unique() {
        // Two fresh salts colliding would mean the RNG is broken.
        let a = generate_salt();
        let b = generate_salt();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_password_deterministic_for_same_salt() {
        let salt = generate_salt();
        let h1 = hash_password("secret", &salt).unwrap();
        let h2 = hash_password("secret", &salt).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_hash_password_differs_across_salts() {
        let h1 = hash_password("secret", &generate_salt()).unwrap();
        let h2 = hash_password("secret", &generate_salt()).unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_hash_password_differs_across_passwords() {
        let salt = generate_salt();
        let h1 = hash_password("secret", &salt).unwrap();
        let h2 = hash_password("Secret", &salt).unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_hash_length() {
        let hash = hash_password("secret", &generate_salt()).unwrap();
        assert_eq!(hash.len(), HASH_LEN);
    }

    #[test]
    fn test_constant_time_eq_equal() {
        assert!(constant_time_eq(b"abcdef", b"abcdef"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_constant_time_eq_mismatch() {
        assert!(!constant_time_eq(b"abcdef", b"abcdeg"));
        assert!(!constant_time_eq(b"abcdef", b"xbcdef"));
    }

    #[test]
    fn test_constant_time_eq_length_mismatch() {
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }

    #[test]
    fn test_password_with_unicode() {
        let salt = generate_salt();
        let hash = hash_password("mật khẩu 123", &salt).unwrap();
        let again = hash_password("mật khẩu 123", &salt).unwrap();
        assert!(constant_time_eq(&hash, &again));
    }
}
