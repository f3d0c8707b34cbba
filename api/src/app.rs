//! Application state and factory
//!
//! This module holds the shared state handed to handlers and builds the
//! Actix-web application around it.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use crm_core::repositories::VerificationRepository;
use crm_core::services::{EmailServiceTrait, VerificationService};
use crm_shared::types::{ApiResponse, ErrorResponse};

use crate::handlers::{json_error_handler, query_error_handler};
use crate::routes::{
    auth::{send_code, verification_status, verify_code},
    health::health_check,
};

/// Application state that holds shared services
pub struct AppState<R, N>
where
    R: VerificationRepository,
    N: EmailServiceTrait,
{
    pub verification_service: Arc<VerificationService<R, N>>,
}

impl<R, N> AppState<R, N>
where
    R: VerificationRepository,
    N: EmailServiceTrait,
{
    pub fn new(verification_service: Arc<VerificationService<R, N>>) -> Self {
        Self { verification_service }
    }
}

/// Register the health check and the `/api/v1` routes
pub fn configure_routes<R, N>(cfg: &mut web::ServiceConfig)
where
    R: VerificationRepository + 'static,
    N: EmailServiceTrait + 'static,
{
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api/v1").service(
            web::scope("/auth")
                .route("/send-code", web::post().to(send_code::<R, N>))
                .route("/verify-code", web::post().to(verify_code::<R, N>))
                .route("/verification-status", web::get().to(verification_status::<R, N>)),
        ),
    );
}

/// Create the application with all routes and middleware
pub fn create_app<R, N>(
    app_state: web::Data<AppState<R, N>>,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: VerificationRepository + 'static,
    N: EmailServiceTrait + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(TracingLogger::default())
        .configure(configure_routes::<R, N>)
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(ErrorResponse::new(
        "NOT_FOUND",
        "The requested resource does not exist",
    )))
}
