//! Argon2id password hashing.
//!
//! Credentials are stored as PHC strings, so each hash carries the parameters
//! it was produced with and verification keeps working after the cost for
//! new hashes changes.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};

use crate::{ForumError, Result};

/// Argon2id cost for newly hashed passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordCost {
    /// Memory in KiB.
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordCost {
    /// m=19 MiB, t=2, p=1.
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str, cost: &PasswordCost) -> Result<String> {
    let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
        .map_err(|e| ForumError::PasswordHash(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ForumError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC string.
pub fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| ForumError::PasswordHash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(ForumError::PasswordHash(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FAST;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("XpdsDP085Un", &FAST).expect("hash");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("XpdsDP085Un", &hash).expect("verify"));
        assert!(!verify_password("wrong", &hash).expect("verify"));
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password("same", &FAST).expect("hash");
        let b = hash_password("same", &FAST).expect("hash");
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(matches!(
            verify_password("x", "plaintext"),
            Err(ForumError::PasswordHash(_))
        ));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let cost = PasswordCost {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };
        assert!(matches!(
            hash_password("x", &cost),
            Err(ForumError::PasswordHash(_))
        ));
    }
}
