use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Default bearer token lifetime in minutes.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Process-wide credential and token authority.
///
/// Bundles the password hasher, the token codec and the token lifetime so
/// they can be constructed once at startup and shared read-only across
/// requests.
#[derive(Clone)]
pub struct TokenIssuer {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    ttl: Duration,
}

/// Token handed back to a client after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

impl TokenIssuer {
    /// Create an issuer signing with `secret` and the default lifetime.
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES))
    }

    /// Create an issuer signing with `secret`, issuing tokens valid for `ttl`.
    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(secret),
            ttl,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Run a password check that always fails, for a username with no account.
    pub fn verify_absent_password(&self, password: &str) -> bool {
        self.password_hasher.verify_absent(password)
    }

    /// Issue a bearer token for `subject`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        let access_token = self.token_codec.encode(subject, self.ttl)?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.ttl.num_seconds(),
        })
    }

    /// Validate a bearer token and return its claims.
    ///
    /// # Errors
    /// * `TokenError` - Token is expired, forged or malformed
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_codec.decode(token)
    }
}
