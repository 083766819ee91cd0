use actix_web::{web, HttpResponse};

use mc_core::repositories::{TokenRepository, UserRepository};
use mc_core::services::PasswordHasher;

use crate::dto::{AuthTokensResponse, RefreshTokenRequest};
use crate::handlers::handle_domain_error;

use super::AppState;

/// Handler for POST /api/auth/refresh-token
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "base64 string",
///     "access_token": "optional, ignored"
/// }
/// ```
///
/// ## Errors
/// - 401 `Invalid refresh token`: unknown token
/// - 401 `Token is expired or revoked`: token already used, revoked or expired
/// - 404: owning user no longer exists
pub async fn refresh_token<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: PasswordHasher + 'static,
{
    match state
        .auth_service
        .refresh_token(request.into_inner().into())
        .await
    {
        Ok(response) => HttpResponse::Ok().json(AuthTokensResponse::from(response)),
        Err(error) => handle_domain_error(error, state.environment),
    }
}
