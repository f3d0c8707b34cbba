use actix_web::{web, HttpResponse};
use validator::Validate;

use crm_core::errors::{DomainError, VerificationError};
use crm_core::repositories::VerificationRepository;
use crm_core::services::EmailServiceTrait;
use crm_shared::types::ApiResponse;
use crm_shared::utils::normalize_email;

use crate::app::AppState;
use crate::dto::VerificationStatusQuery;
use crate::handlers::ApiError;

/// Handler for GET /api/v1/auth/verification-status?email=...
///
/// Read-only: never counts as an attempt and never reveals the code.
pub async fn verification_status<R, N>(
    state: web::Data<AppState<R, N>>,
    query: web::Query<VerificationStatusQuery>,
) -> Result<HttpResponse, ApiError>
where
    R: VerificationRepository + 'static,
    N: EmailServiceTrait + 'static,
{
    let query = VerificationStatusQuery {
        email: normalize_email(&query.email),
    };
    query.validate()?;

    let pending = state
        .verification_service
        .pending_verification(&query.email)
        .await?
        .ok_or_else(|| DomainError::from(VerificationError::NotFound))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(pending)))
}
