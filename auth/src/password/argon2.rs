use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Reference hash verified against when the account does not exist.
static ABSENT_ACCOUNT_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Credential hasher.
///
/// One-way, salted password hashing backed by Argon2id. Every call to
/// [`PasswordHasher::hash`] draws a fresh salt, so hashing the same password
/// twice yields two different PHC strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher configured with the Argon2id defaults
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (algorithm, parameters, salt and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The salt and cost parameters are read back from the PHC string; the
    /// digest comparison is constant-time. A hash that cannot be parsed is
    /// a verification failure, not an error.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Spend one verification's worth of work for an account that does not
    /// exist, so the caller's latency matches a wrong-password attempt.
    ///
    /// # Returns
    /// Always false
    pub fn verify_absent(&self, password: &str) -> bool {
        let reference = ABSENT_ACCOUNT_HASH
            .get_or_init(|| self.hash("absent-account-reference").ok());

        if let Some(hash) = reference {
            self.verify(password, hash);
        }

        false
    }
}
