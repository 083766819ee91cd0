//! Error types for authentication and token handling
//!
//! The display strings of `AuthError` are returned to clients verbatim, so
//! they must not reveal which part of a credential check failed.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No stored refresh token matches the presented value
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// The refresh token exists but was rotated away, revoked or has expired
    #[error("Token is expired or revoked")]
    TokenExpiredOrRevoked,

    /// Missing or unusable bearer credentials on a protected route
    #[error("Authentication required")]
    Unauthenticated,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature, issuer, audience, expiry or payload check failed
    #[error("Invalid token")]
    InvalidToken,

    /// The value is not a three-segment JWT
    #[error("Malformed token")]
    MalformedToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}
