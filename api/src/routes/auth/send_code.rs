use actix_web::{web, HttpResponse};
use validator::Validate;

use crm_core::repositories::VerificationRepository;
use crm_core::services::EmailServiceTrait;
use crm_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::{SendCodeRequest, SendCodeResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/send-code
///
/// Issues a fresh code for the address, replacing any outstanding one, and
/// emails it.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": {
///         "email": "user@example.com",
///         "expires_at": "2025-08-14T10:10:00Z",
///         "expires_in": 600
///     },
///     "timestamp": "2025-08-14T10:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 `VALIDATION_ERROR` when the address is malformed
/// - 503 `DELIVERY_FAILED` when the email could not be sent
/// - 500 `INTERNAL_ERROR` when the code could not be stored
pub async fn send_code<R, N>(
    state: web::Data<AppState<R, N>>,
    request: web::Json<SendCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: VerificationRepository + 'static,
    N: EmailServiceTrait + 'static,
{
    let request = request.into_inner().normalized();
    request.validate()?;

    let sent = state
        .verification_service
        .send_verification_code(&request.email)
        .await?;

    let expires_in = sent.issued.expires_in().num_seconds().max(0);
    Ok(HttpResponse::Ok().json(ApiResponse::success(SendCodeResponse {
        email: sent.issued.email,
        expires_at: sent.issued.expires_at,
        expires_in,
    })))
}
