use actix_web::{web, HttpResponse};
use validator::Validate;

use crm_core::repositories::VerificationRepository;
use crm_core::services::EmailServiceTrait;
use crm_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/verify-code
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com", "code": "123456" }
/// ```
///
/// ## Errors
/// - 404 `VERIFICATION_NOT_FOUND` when nothing is pending for the address
/// - 400 `CODE_EXPIRED` when the code is past its expiry
/// - 429 `TOO_MANY_ATTEMPTS` once the attempt cap is reached
/// - 400 `INVALID_CODE` on a mismatch, with `details.remaining_attempts`
pub async fn verify_code<R, N>(
    state: web::Data<AppState<R, N>>,
    request: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: VerificationRepository + 'static,
    N: EmailServiceTrait + 'static,
{
    let request = request.into_inner().normalized();
    request.validate()?;

    state
        .verification_service
        .verify(&request.email, &request.code)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(VerifyCodeResponse {
        email: request.email,
        verified: true,
    })))
}
