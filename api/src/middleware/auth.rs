//! JWT authentication middleware for protecting API endpoints.
//!
//! Extracts the bearer token from the Authorization header, verifies it
//! through the `TokenVerifier` registered as app data and injects an
//! `AuthContext` into the request extensions.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::{header::AUTHORIZATION, StatusCode},
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use mc_core::{
    domain::entities::token::AccessClaims,
    domain::entities::user::Role,
    errors::{DomainError, TokenError},
    repositories::TokenRepository,
    services::token::TokenService,
};
use mc_shared::{error_codes, ErrorResponse};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};
use uuid::Uuid;

use crate::handlers::error_response;

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID from the `sub` claim
    pub user_id: Uuid,
    /// Role at token issuance
    pub role: Role,
}

impl AuthContext {
    pub fn from_claims(claims: AccessClaims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;
        Ok(Self {
            user_id,
            role: claims.role,
        })
    }
}

/// Access token verification used by the middleware
pub trait TokenVerifier: Send + Sync {
    fn verify_access_token(&self, token: &str) -> Result<AccessClaims, DomainError>;
}

impl<R: TokenRepository> TokenVerifier for TokenService<R> {
    fn verify_access_token(&self, token: &str) -> Result<AccessClaims, DomainError> {
        TokenService::verify_access_token(self, token)
    }
}

/// JWT authentication middleware factory
#[derive(Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let outcome = authenticate(&req);

            match outcome {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(response) => {
                    let (request, _) = req.into_parts();
                    Ok(ServiceResponse::new(request, response).map_into_right_body())
                }
            }
        })
    }
}

fn authenticate(req: &ServiceRequest) -> Result<AuthContext, HttpResponse> {
    let token = extract_bearer_token(req).ok_or_else(|| {
        error_response(
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(
                error_codes::UNAUTHORIZED,
                "Missing or invalid Authorization header",
            ),
        )
    })?;

    let verifier = req
        .app_data::<web::Data<Arc<dyn TokenVerifier>>>()
        .ok_or_else(|| {
            tracing::error!("No token verifier registered; rejecting protected request");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred"),
            )
        })?;

    verifier
        .verify_access_token(&token)
        .and_then(AuthContext::from_claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            error_response(
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(error_codes::TOKEN_INVALID, e.to_string()),
            )
        })
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
