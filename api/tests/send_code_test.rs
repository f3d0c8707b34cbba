mod common;

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    use crm_api::create_app;
    use crm_core::VerificationRepository;
    use crm_infra::email::MockEmailService;

    use crate::common::{context, context_with_mailer, MAX_PAYLOAD};

    #[actix_web::test]
    async fn test_send_code_success() {
        let ctx = context();
        let app = test::init_service(create_app(ctx.state.clone(), MAX_PAYLOAD)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/send-code")
            .set_json(json!({ "email": "  User@Example.com " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["email"], "user@example.com");
        assert_eq!(body["data"]["expires_in"], 600);
        assert!(body["data"].get("code").is_none());

        let record = ctx.repository.find_by_email("user@example.com").await.unwrap().unwrap();
        assert_eq!(record.attempts, 0);
        assert_eq!(ctx.mailer.get_message_count(), 1);

        let (to, message) = ctx.mailer.last_message().unwrap();
        assert_eq!(to, "user@example.com");
        assert!(message.body.contains(&record.code));
        assert!(message.body.contains("expires in 10 minutes"));
    }

    #[actix_web::test]
    async fn test_send_code_rejects_undeliverable_addresses() {
        let ctx = context();
        let app = test::init_service(create_app(ctx.state.clone(), MAX_PAYLOAD)).await;

        for email in ["a@localhost", "a@b\u{fc}cher.de", "a@[127.0.0.1]"] {
            let req = test::TestRequest::post()
                .uri("/api/v1/auth/send-code")
                .set_json(json!({ "email": email }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{email:?}");

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"]["error"], "VALIDATION_ERROR");
        }

        assert!(ctx.repository.is_empty().await);
        assert_eq!(ctx.mailer.get_message_count(), 0);
    }

    #[actix_web::test]
    async fn test_send_code_replaces_previous_code() {
        let ctx = context();
        let app = test::init_service(create_app(ctx.state.clone(), MAX_PAYLOAD)).await;

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/v1/auth/send-code")
                .set_json(json!({ "email": "a@x.com" }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }

        assert_eq!(ctx.repository.len().await, 1);
        assert_eq!(ctx.mailer.get_message_count(), 2);
    }

    #[actix_web::test]
    async fn test_send_code_rejects_invalid_email() {
        let ctx = context();
        let app = test::init_service(create_app(ctx.state.clone(), MAX_PAYLOAD)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/send-code")
            .set_json(json!({ "email": "not-an-email" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["error"], "VALIDATION_ERROR");
        assert!(ctx.repository.is_empty().await);
    }

    #[actix_web::test]
    async fn test_send_code_rejects_malformed_body() {
        let ctx = context();
        let app = test::init_service(create_app(ctx.state.clone(), MAX_PAYLOAD)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/send-code")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"email\":")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["error"], "INVALID_REQUEST");
    }

    #[actix_web::test]
    async fn test_send_code_delivery_failure_keeps_code() {
        let ctx = context_with_mailer(MockEmailService::with_options(true));
        let app = test::init_service(create_app(ctx.state.clone(), MAX_PAYLOAD)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/send-code")
            .set_json(json!({ "email": "a@x.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["error"], "DELIVERY_FAILED");

        // The stored code is still verifiable
        let record = ctx.repository.find_by_email("a@x.com").await.unwrap().unwrap();
        ctx.state
            .verification_service
            .verify("a@x.com", &record.code)
            .await
            .unwrap();
    }
}
