//! Conversion of domain errors into HTTP responses

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use mc_core::errors::{DomainError, TokenError};
use mc_shared::{error_codes, Environment, ErrorResponse};

/// Generic message for failures whose cause stays server-side
const INTERNAL_MESSAGE: &str = "An internal error occurred";

pub fn error_response(status: StatusCode, body: ErrorResponse) -> HttpResponse {
    HttpResponse::build(status).json(body)
}

/// Map a domain error to its status code and wire body
///
/// Storage and internal failures are logged; their cause is only echoed
/// back in development.
pub fn handle_domain_error(error: DomainError, environment: Environment) -> HttpResponse {
    let (status, body) = match error {
        DomainError::Validation { fields } => {
            let body = fields.into_iter().fold(
                ErrorResponse::new(error_codes::VALIDATION_ERROR, "Validation failed"),
                |body, (field, messages)| body.add_detail(field, messages),
            );
            (StatusCode::BAD_REQUEST, body)
        }
        DomainError::BusinessRule { message } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::BAD_REQUEST, message),
        ),
        DomainError::Auth(e) => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::UNAUTHORIZED, e.to_string()),
        ),
        DomainError::Token(e @ (TokenError::InvalidToken | TokenError::MalformedToken)) => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::TOKEN_INVALID, e.to_string()),
        ),
        e @ DomainError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::NOT_FOUND, e.to_string()),
        ),
        e @ (DomainError::Token(TokenError::TokenGenerationFailed)
        | DomainError::Storage { .. }
        | DomainError::Internal { .. }) => {
            tracing::error!(error = %e, "Request failed with internal error");
            let mut body = ErrorResponse::new(error_codes::INTERNAL_ERROR, INTERNAL_MESSAGE);
            if environment.is_development() {
                body = body.add_detail("reason", e.to_string());
            }
            (StatusCode::INTERNAL_SERVER_ERROR, body)
        }
    };

    error_response(status, body)
}

/// Render body parse failures in the common error shape
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorResponse::new(error_codes::BAD_REQUEST, format!("Invalid request body: {}", err));
    actix_web::error::InternalError::from_response(err, error_response(StatusCode::BAD_REQUEST, body))
        .into()
}
