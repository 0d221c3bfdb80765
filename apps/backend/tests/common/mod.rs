#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use backend_test_support::problem_details::{
    assert_problem_details_from_service_response, ProblemDetailsLike,
};

// Logging is auto-installed for every test binary that declares `mod common;`
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Assert a 401 Problem Details response with the given code.
pub async fn assert_unauthorized(
    resp: ServiceResponse<BoxBody>,
    expected_code: &str,
    expected_detail: &str,
) -> ProblemDetailsLike {
    assert_problem_details_from_service_response(
        resp,
        StatusCode::UNAUTHORIZED,
        expected_code,
        Some(expected_detail),
    )
    .await
}
