//! Input commands for the auth use cases

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterCommand {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    pub profile_picture_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginCommand {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Exchange of a refresh token for a new pair
///
/// `access_token` is accepted for client compatibility and not inspected.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenCommand {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,

    #[serde(default)]
    pub access_token: Option<String>,
}
