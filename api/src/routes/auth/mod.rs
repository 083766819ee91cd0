//! Authentication route handlers
//!
//! - `POST /api/auth/register`
//! - `POST /api/auth/login`
//! - `POST /api/auth/refresh-token`
//! - `GET /api/auth/me` (bearer token required)

pub mod login;
pub mod me;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use mc_core::repositories::{TokenRepository, UserRepository};
use mc_core::services::{AuthService, PasswordHasher};
use mc_shared::Environment;

/// Application state shared by the auth handlers
pub struct AppState<U, T, P>
where
    U: UserRepository,
    T: TokenRepository,
    P: PasswordHasher,
{
    pub auth_service: Arc<AuthService<U, T, P>>,
    /// Controls how much error detail reaches clients
    pub environment: Environment,
}

impl<U, T, P> AppState<U, T, P>
where
    U: UserRepository,
    T: TokenRepository,
    P: PasswordHasher,
{
    pub fn new(auth_service: Arc<AuthService<U, T, P>>, environment: Environment) -> Self {
        Self {
            auth_service,
            environment,
        }
    }
}
