//! Main authentication service implementation

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::user::User;
use crate::domain::value_objects::{AuthResponse, UserName, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenService;

use super::commands::{LoginCommand, RefreshTokenCommand, RegisterCommand};
use super::password::PasswordHasher;

/// Authentication service for the register/login/refresh flows
pub struct AuthService<U, T, P>
where
    U: UserRepository,
    T: TokenRepository,
    P: PasswordHasher,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token service for JWT and refresh token management
    token_service: Arc<TokenService<T>>,
    /// Password hashing backend
    password_hasher: Arc<P>,
}

impl<U, T, P> AuthService<U, T, P>
where
    U: UserRepository,
    T: TokenRepository,
    P: PasswordHasher,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<T>>,
        password_hasher: Arc<P>,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            password_hasher,
        }
    }

    pub fn token_service(&self) -> &Arc<TokenService<T>> {
        &self.token_service
    }

    /// Register a new account and sign it in
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - malformed email, short password or blank name
    /// * `DomainError::BusinessRule` - the email is already registered
    pub async fn register(&self, command: RegisterCommand) -> DomainResult<AuthResponse> {
        command.validate()?;
        let name = UserName::new(&command.first_name, &command.last_name)?;

        if self.user_repository.exists_by_email(&command.email).await? {
            tracing::info!("Registration rejected for existing email");
            return Err(DomainError::BusinessRule {
                message: "Email already registered".to_string(),
            });
        }

        let password_hash = self.password_hasher.hash(&command.password)?;
        let user = User::new(
            command.email,
            password_hash,
            name,
            command.profile_picture_path,
        );
        let user = self.user_repository.create(user).await?;

        tracing::info!(user_id = %user.id, "User registered");

        let issued = self.token_service.issue_token_pair(&user).await?;
        Ok(issued.into())
    }

    /// Authenticate with email and password
    ///
    /// Unknown email and wrong password both yield
    /// `AuthError::InvalidCredentials`.
    pub async fn login(&self, command: LoginCommand) -> DomainResult<AuthResponse> {
        command.validate()?;

        let user = self
            .user_repository
            .find_by_email(&command.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self
            .password_hasher
            .verify(&command.password, &user.password_hash)?
        {
            tracing::info!(user_id = %user.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        tracing::info!(user_id = %user.id, "User logged in");

        let issued = self.token_service.issue_token_pair(&user).await?;
        Ok(issued.into())
    }

    /// Exchange a refresh token for a new pair, revoking the presented one
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidRefreshToken` - no such token
    /// * `AuthError::TokenExpiredOrRevoked` - token rotated away, revoked or expired
    /// * `DomainError::NotFound` - the owner no longer exists
    pub async fn refresh_token(&self, command: RefreshTokenCommand) -> DomainResult<AuthResponse> {
        command.validate()?;

        let stored = self
            .token_service
            .find_refresh_token(&command.refresh_token)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if stored.is_revoked || stored.expires_at <= Utc::now() {
            tracing::warn!(
                user_id = %stored.user_id,
                revoked = stored.is_revoked,
                "Rejected refresh with unusable token"
            );
            return Err(AuthError::TokenExpiredOrRevoked.into());
        }

        let user = self
            .user_repository
            .find_by_id(stored.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        let issued = self
            .token_service
            .rotate_refresh_token(&user, &command.refresh_token)
            .await?;

        tracing::debug!(user_id = %user.id, "Refresh token rotated");

        Ok(issued.into())
    }

    /// Load the public profile of a user
    pub async fn get_profile(&self, user_id: Uuid) -> DomainResult<UserProfile> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        Ok(UserProfile::from(&user))
    }
}
