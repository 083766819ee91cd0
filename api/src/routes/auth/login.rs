use actix_web::{web, HttpResponse};

use mc_core::repositories::{TokenRepository, UserRepository};
use mc_core::services::PasswordHasher;

use crate::dto::{AuthTokensResponse, LoginRequest};
use crate::handlers::handle_domain_error;

use super::AppState;

/// Handler for POST /api/auth/login
///
/// Any earlier refresh token of the user stops working once this succeeds.
pub async fn login<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: PasswordHasher + 'static,
{
    match state.auth_service.login(request.into_inner().into()).await {
        Ok(response) => HttpResponse::Ok().json(AuthTokensResponse::from(response)),
        Err(error) => handle_domain_error(error, state.environment),
    }
}
