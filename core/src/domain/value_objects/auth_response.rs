//! Response value objects returned by the auth use cases.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::IssuedTokens;
use crate::domain::entities::user::{Role, User};

/// Token pair handed back to the client after login, register or refresh
///
/// The refresh token is the raw opaque string; the stored row id never
/// leaves the domain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Signed JWT access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,
}

impl From<IssuedTokens> for AuthResponse {
    fn from(tokens: IssuedTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token.token,
        }
    }
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub role: Role,
    pub profile_picture_path: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.name.first_name().to_string(),
            last_name: user.name.last_name().to_string(),
            full_name: user.name.full_name(),
            role: user.role,
            profile_picture_path: user.profile_picture_path.clone(),
        }
    }
}
