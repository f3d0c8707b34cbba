//! Conversion of domain errors into HTTP responses
//!
//! Every error body is an `ApiResponse` envelope with `success: false` and a
//! machine-readable `error` code.

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError, ResponseError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use validator::ValidationErrors;

use crm_core::errors::{DomainError, VerificationError};
use crm_shared::types::{ApiResponse, ErrorResponse};

/// Error returned by API handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

impl ApiError {
    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Domain(DomainError::Verification(err)) => ErrorResponse::from(err),
            ApiError::Domain(DomainError::Validation { message }) => {
                ErrorResponse::new("VALIDATION_ERROR", message.clone())
            }
            ApiError::Domain(DomainError::NotFound { resource }) => {
                ErrorResponse::new("NOT_FOUND", format!("{} not found", resource))
            }
            ApiError::Domain(DomainError::Delivery { .. }) => ErrorResponse::new(
                "DELIVERY_FAILED",
                "The verification email could not be sent. Please request a new code",
            ),
            // Storage details stay in the logs
            ApiError::Domain(DomainError::Internal { .. }) => {
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
            }
            ApiError::InvalidRequest(message) => {
                ErrorResponse::new("INVALID_REQUEST", message.clone())
            }
            ApiError::Validation(errors) => {
                let fields: Vec<String> =
                    errors.field_errors().keys().map(|k| k.to_string()).collect();
                ErrorResponse::new("VALIDATION_ERROR", "Invalid request data")
                    .with_detail("fields", serde_json::json!(fields))
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::Verification(err)) => match err {
                VerificationError::NotFound => StatusCode::NOT_FOUND,
                VerificationError::Expired => StatusCode::BAD_REQUEST,
                VerificationError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
                VerificationError::InvalidCode { .. } => StatusCode::BAD_REQUEST,
            },
            ApiError::Domain(DomainError::Validation { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::Delivery { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Domain(DomainError::Internal { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        HttpResponse::build(status).json(ApiResponse::<()>::error(self.body()))
    }
}

/// JSON extractor error handler: malformed bodies become `INVALID_REQUEST`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidRequest(err.to_string()).into()
}

/// Query string extractor error handler
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidRequest(err.to_string()).into()
}
