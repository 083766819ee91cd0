//! Main token service implementation

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Uuid;

use crate::domain::entities::token::{AccessClaims, IssuedTokens, RefreshToken};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Number of random bytes in a refresh token
const REFRESH_TOKEN_BYTES: usize = 32;

/// Service for issuing and validating tokens
///
/// Access tokens are stateless HS256 JWTs. Refresh tokens are opaque random
/// strings persisted through `R`; issuing a new pair always revokes every
/// earlier refresh token of the same user.
pub struct TokenService<R: TokenRepository> {
    repository: R,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Errors
    ///
    /// `DomainError::Internal` if the signing secret is empty.
    pub fn new(repository: R, config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.secret.is_empty() {
            return Err(DomainError::Internal {
                message: "JWT signing secret must not be empty".to_string(),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

        Ok(Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Issues a fresh access/refresh pair for `user`
    ///
    /// All previously issued refresh tokens of the user are revoked in the
    /// same storage step that persists the new one.
    pub async fn issue_token_pair(&self, user: &User) -> Result<IssuedTokens, DomainError> {
        self.issue(user, None).await
    }

    /// Exchanges the refresh token `presented` for a fresh pair
    ///
    /// `presented` is consumed inside the storage rotation, so of two
    /// concurrent exchanges of the same token only one succeeds.
    ///
    /// # Errors
    ///
    /// `AuthError::TokenExpiredOrRevoked` if `presented` is no longer a live
    /// token of `user` when the rotation runs.
    pub async fn rotate_refresh_token(
        &self,
        user: &User,
        presented: &str,
    ) -> Result<IssuedTokens, DomainError> {
        self.issue(user, Some(presented)).await
    }

    async fn issue(&self, user: &User, presented: Option<&str>) -> Result<IssuedTokens, DomainError> {
        let access_token = self.mint_access_token(user)?;
        let refresh_token = self.mint_refresh_token(user.id);

        let refresh_token = self
            .repository
            .rotate_user_tokens(presented, refresh_token)
            .await?;

        tracing::debug!(user_id = %user.id, rotated = presented.is_some(), "Issued token pair");

        Ok(IssuedTokens {
            access_token,
            refresh_token,
        })
    }

    /// Signs an access token for `user`; touches no storage
    pub fn mint_access_token(&self, user: &User) -> Result<String, DomainError> {
        let claims = AccessClaims::for_user(
            user,
            &self.config.issuer,
            &self.config.audience,
            self.config.access_token_ttl(),
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign access token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Builds an unsaved refresh token from 32 OS-random bytes
    pub fn mint_refresh_token(&self, user_id: Uuid) -> RefreshToken {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);

        RefreshToken::new(user_id, STANDARD.encode(bytes), self.config.refresh_token_ttl())
    }

    /// Looks up a stored refresh token, revoked or not
    pub async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        self.repository.find_by_token(token).await
    }

    /// Whether `token` exists, is not revoked and has not reached its expiry
    pub async fn is_refresh_token_valid(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self
            .repository
            .find_by_token(token)
            .await?
            .map(|t| !t.is_revoked && t.expires_at > Utc::now())
            .unwrap_or(false))
    }

    /// Verifies an access token and returns its claims
    ///
    /// # Errors
    ///
    /// * `TokenError::MalformedToken` - not three dot-separated segments
    /// * `TokenError::InvalidToken` - any signature, issuer, audience, expiry
    ///   or payload failure
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, DomainError> {
        if token.split('.').count() != 3 {
            return Err(TokenError::MalformedToken.into());
        }

        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidToken => TokenError::MalformedToken.into(),
                _ => {
                    tracing::debug!(error = %e, "Access token rejected");
                    TokenError::InvalidToken.into()
                }
            })
    }

    /// Validates an access token and returns the user id it was issued to
    pub fn extract_subject(&self, token: &str) -> Result<Uuid, DomainError> {
        let claims = self.verify_access_token(token)?;
        claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))
    }
}
