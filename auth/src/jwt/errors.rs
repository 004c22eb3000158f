use thiserror::Error;

/// Error type for token operations.
///
/// Every decode failure is terminal for the token in question; callers
/// should not try to salvage claims from a token that failed here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}
