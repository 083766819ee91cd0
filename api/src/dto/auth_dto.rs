//! Request and response bodies of the auth endpoints
//!
//! Missing request fields deserialize to empty values so that they surface
//! as field-level validation errors instead of a body parse failure.

use mc_core::domain::value_objects::{AuthResponse, UserProfile};
use mc_core::services::{LoginCommand, RefreshTokenCommand, RegisterCommand};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub profile_picture_path: Option<String>,
}

impl From<RegisterRequest> for RegisterCommand {
    fn from(request: RegisterRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
            profile_picture_path: request.profile_picture_path,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<LoginRequest> for LoginCommand {
    fn from(request: LoginRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
        }
    }
}

/// Body of `POST /api/auth/refresh-token`
///
/// Clients may echo their current access token; it is ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl From<RefreshTokenRequest> for RefreshTokenCommand {
    fn from(request: RefreshTokenRequest) -> Self {
        Self {
            refresh_token: request.refresh_token,
            access_token: request.access_token,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthTokensResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<AuthResponse> for AuthTokensResponse {
    fn from(response: AuthResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub role: String,
    pub profile_picture_path: Option<String>,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            full_name: profile.full_name,
            role: profile.role.to_string(),
            profile_picture_path: profile.profile_picture_path,
        }
    }
}
