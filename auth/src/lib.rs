//! Authentication core library
//!
//! Provides the credential and token primitives used by the auth service:
//! - Password hashing (Argon2id)
//! - Signed, expiring bearer tokens (HS256 JWT)
//! - A token issuer bundling both with a configured token lifetime
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.encode("alice", Duration::minutes(30)).unwrap();
//! let claims = codec.decode(&token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```
//!
//! ## Login Flow
//! ```
//! use auth::TokenIssuer;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = issuer.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! assert!(issuer.verify_password("password123", &hash));
//! let issued = issuer.issue("alice").unwrap();
//!
//! // Protected request: validate token
//! let claims = issuer.validate(&issued.access_token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;

pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use issuer::DEFAULT_TOKEN_TTL_MINUTES;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
