//! Route table and request-level configuration

use actix_web::{web, HttpResponse};

use mc_core::repositories::{TokenRepository, UserRepository};
use mc_core::services::PasswordHasher;
use mc_shared::{error_codes, ErrorResponse};

use crate::handlers::{error_response, json_error_handler};
use crate::middleware::JwtAuth;
use crate::routes::auth::{login::login, me::me, refresh::refresh_token, register::register};
use crate::routes::health::health_check;

/// Register every route of the API
///
/// Expects `web::Data<AppState<U, T, P>>` and
/// `web::Data<Arc<dyn TokenVerifier>>` to be registered as app data.
pub fn configure_app<U, T, P>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: PasswordHasher + 'static,
{
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/auth")
                .route("/register", web::post().to(register::<U, T, P>))
                .route("/login", web::post().to(login::<U, T, P>))
                .route("/refresh-token", web::post().to(refresh_token::<U, T, P>))
                .service(
                    web::resource("/me")
                        .wrap(JwtAuth::new())
                        .route(web::get().to(me::<U, T, P>)),
                ),
        )
        .default_service(web::route().to(not_found));
}

async fn not_found() -> HttpResponse {
    error_response(
        actix_web::http::StatusCode::NOT_FOUND,
        ErrorResponse::new(
            error_codes::NOT_FOUND,
            "The requested resource was not found",
        ),
    )
}
