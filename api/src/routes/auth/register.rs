use actix_web::{web, HttpResponse};

use mc_core::repositories::{TokenRepository, UserRepository};
use mc_core::services::PasswordHasher;

use crate::dto::{AuthTokensResponse, RegisterRequest};
use crate::handlers::handle_domain_error;

use super::AppState;

/// Handler for POST /api/auth/register
///
/// Creates the account and returns a token pair.
///
/// ## Errors
/// - 400 `VALIDATION_ERROR`: malformed email, short password or blank name
/// - 400 `BAD_REQUEST`: email already registered
pub async fn register<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: PasswordHasher + 'static,
{
    match state.auth_service.register(request.into_inner().into()).await {
        Ok(response) => HttpResponse::Ok().json(AuthTokensResponse::from(response)),
        Err(error) => handle_domain_error(error, state.environment),
    }
}
