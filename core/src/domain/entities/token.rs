//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{Role, User};

/// Claims structure for the access token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Role of the subject at issuance time
    pub role: Role,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl AccessClaims {
    /// Creates claims for `user` valid for `ttl` from now
    pub fn for_user(user: &User, issuer: &str, audience: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user.id.to_string(),
            role: user.role,
            iss: issuer.to_string(),
            aud: audience.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Refresh token entity stored in the database
///
/// `token` is the opaque value handed to the client. Once `is_revoked` is
/// set it never goes back to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Internal row identifier
    pub id: Uuid,

    /// Opaque random token value
    pub token: String,

    /// Owner of the token
    pub user_id: Uuid,

    pub expires_at: DateTime<Utc>,

    pub is_revoked: bool,

    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Creates a new, non-revoked refresh token expiring after `ttl`
    pub fn new(user_id: Uuid, token: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            token,
            user_id,
            expires_at: now + ttl,
            is_revoked: false,
            created_at: now,
        }
    }

    /// A token is expired from the instant `expires_at` is reached
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Checks if the refresh token can still be exchanged
    pub fn is_valid(&self) -> bool {
        !self.is_revoked && !self.is_expired()
    }

    /// Revokes the refresh token
    pub fn revoke(&mut self) {
        self.is_revoked = true;
    }
}

/// Result of a successful issuance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedTokens {
    /// Signed JWT access token
    pub access_token: String,

    /// The refresh token that was persisted
    pub refresh_token: RefreshToken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::UserName;

    fn sample_user() -> User {
        User::new(
            "ada@example.com".to_string(),
            "hash".to_string(),
            UserName::new("Ada", "Lovelace").unwrap(),
            None,
        )
    }

    #[test]
    fn test_access_claims_for_user() {
        let user = sample_user();
        let claims = AccessClaims::for_user(&user, "iss", "aud", Duration::minutes(15));

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert_eq!(claims.user_id().unwrap(), user.id);
    }

    #[test]
    fn test_refresh_token_creation() {
        let user_id = Uuid::new_v4();
        let token = RefreshToken::new(user_id, "opaque".to_string(), Duration::days(7));

        assert_eq!(token.user_id, user_id);
        assert_eq!(token.token, "opaque");
        assert!(!token.is_revoked);
        assert!(!token.is_expired());
        assert!(token.is_valid());
    }

    #[test]
    fn test_refresh_token_revocation() {
        let mut token = RefreshToken::new(Uuid::new_v4(), "t".to_string(), Duration::days(7));

        token.revoke();
        token.revoke();

        assert!(token.is_revoked);
        assert!(!token.is_valid());
    }

    #[test]
    fn test_refresh_token_expired_at_boundary() {
        let mut token = RefreshToken::new(Uuid::new_v4(), "t".to_string(), Duration::days(7));

        token.expires_at = Utc::now();
        assert!(token.is_expired());

        token.expires_at = Utc::now() - Duration::seconds(1);
        assert!(!token.is_valid());
    }
}
