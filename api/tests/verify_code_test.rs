mod common;

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use chrono::Duration;
    use serde_json::{json, Value};

    use crm_api::create_app;
    use crm_core::VerificationRepository;

    use crate::common::{context, wrong_code, MAX_PAYLOAD};

    fn verify_request(email: &str, code: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/v1/auth/verify-code")
            .set_json(json!({ "email": email, "code": code }))
    }

    #[actix_web::test]
    async fn test_verify_code_success_consumes_record() {
        let ctx = context();
        let app = test::init_service(create_app(ctx.state.clone(), MAX_PAYLOAD)).await;
        let issued = ctx.state.verification_service.issue("a@x.com").await.unwrap();

        let resp = test::call_service(&app, verify_request("A@X.com", &issued.code).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["email"], "a@x.com");
        assert_eq!(body["data"]["verified"], true);
        assert!(ctx.repository.is_empty().await);

        // Codes are single use
        let resp = test::call_service(&app, verify_request("a@x.com", &issued.code).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_verify_code_without_pending_record() {
        let ctx = context();
        let app = test::init_service(create_app(ctx.state.clone(), MAX_PAYLOAD)).await;

        let resp = test::call_service(&app, verify_request("nobody@x.com", "123456").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["error"], "VERIFICATION_NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_verify_code_mismatch_reports_remaining_attempts() {
        let ctx = context();
        let app = test::init_service(create_app(ctx.state.clone(), MAX_PAYLOAD)).await;
        let issued = ctx.state.verification_service.issue("a@x.com").await.unwrap();
        let wrong = wrong_code(&issued.code);

        for remaining in [2, 1, 0] {
            let resp = test::call_service(&app, verify_request("a@x.com", &wrong).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"]["error"], "INVALID_CODE");
            assert_eq!(body["error"]["details"]["remaining_attempts"], remaining);
        }

        // Locked even for the right code
        let resp = test::call_service(&app, verify_request("a@x.com", &issued.code).to_request()).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["error"], "TOO_MANY_ATTEMPTS");

        let record = ctx.repository.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(record.attempts, 3);
    }

    #[actix_web::test]
    async fn test_verify_code_expired() {
        let ctx = context();
        let app = test::init_service(create_app(ctx.state.clone(), MAX_PAYLOAD)).await;
        let issued = ctx.state.verification_service.issue("a@x.com").await.unwrap();

        ctx.clock.advance(Duration::minutes(10));

        let resp = test::call_service(&app, verify_request("a@x.com", &issued.code).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["error"], "CODE_EXPIRED");
    }

    #[actix_web::test]
    async fn test_verify_code_rejects_malformed_code() {
        let ctx = context();
        let app = test::init_service(create_app(ctx.state.clone(), MAX_PAYLOAD)).await;
        ctx.state.verification_service.issue("a@x.com").await.unwrap();

        for code in ["123", "12345a", "1234567"] {
            let resp = test::call_service(&app, verify_request("a@x.com", code).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"]["error"], "VALIDATION_ERROR");
        }

        // Rejected before reaching the service, so no attempt is recorded
        let record = ctx.repository.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(record.attempts, 0);
    }

    #[actix_web::test]
    async fn test_verification_status() {
        let ctx = context();
        let app = test::init_service(create_app(ctx.state.clone(), MAX_PAYLOAD)).await;
        let issued = ctx.state.verification_service.issue("a@x.com").await.unwrap();
        let _ = ctx
            .state
            .verification_service
            .verify("a@x.com", &wrong_code(&issued.code))
            .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/verification-status?email=a%40x.com")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["email"], "a@x.com");
        assert_eq!(body["data"]["attempts"], 1);
        assert_eq!(body["data"]["remaining_attempts"], 2);
        assert!(body["data"].get("code").is_none());

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/verification-status?email=other%40x.com")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
