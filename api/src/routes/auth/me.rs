use actix_web::{web, HttpResponse};

use mc_core::repositories::{TokenRepository, UserRepository};
use mc_core::services::PasswordHasher;

use crate::dto::UserProfileResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

use super::AppState;

/// Handler for GET /api/auth/me, behind `JwtAuth`
pub async fn me<U, T, P>(state: web::Data<AppState<U, T, P>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: PasswordHasher + 'static,
{
    match state.auth_service.get_profile(auth.user_id).await {
        Ok(profile) => HttpResponse::Ok().json(UserProfileResponse::from(profile)),
        Err(error) => handle_domain_error(error, state.environment),
    }
}
