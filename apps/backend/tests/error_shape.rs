mod common;
mod support;

use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use stakkit_backend::errors::DomainError;
use stakkit_backend::{AppError, SecurityConfig};

use support::{create_test_app, static_state};

async fn failing_service() -> Result<HttpResponse, AppError> {
    Err(DomainError::infra("notifier down").into())
}

async fn missing_bearer() -> Result<HttpResponse, AppError> {
    Err(AppError::unauthorized_missing_bearer())
}

#[actix_web::test]
async fn domain_failure_is_500_problem_details() {
    let (state, _) = static_state(SecurityConfig::default()).await;
    let app = create_test_app(state)
        .with_routes(|cfg| {
            cfg.route("/_test/fail", web::get().to(failing_service));
        })
        .build()
        .await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/_test/fail").to_request()).await;

    let problem = assert_problem_details_from_service_response(
        resp,
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL",
        Some("notifier down"),
    )
    .await;
    assert_eq!(problem.type_, "https://stakkit.app/errors/INTERNAL");
    assert_eq!(problem.title, "Internal");
}

#[actix_web::test]
async fn trace_id_matches_request_id() {
    let (state, _) = static_state(SecurityConfig::default()).await;
    let app = create_test_app(state)
        .with_routes(|cfg| {
            cfg.route("/_test/unauthorized", web::get().to(missing_bearer));
        })
        .build()
        .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/_test/unauthorized").to_request(),
    )
    .await;

    let request_id = resp
        .headers()
        .get("x-request-id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let problem = common::assert_unauthorized(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        "Missing or malformed Bearer token",
    )
    .await;
    assert_eq!(problem.trace_id, request_id);
    assert_ne!(problem.trace_id, "unknown");
}
