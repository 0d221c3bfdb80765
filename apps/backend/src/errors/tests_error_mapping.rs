// Status/code table for every AppError the service can produce.
use crate::auth::jwt::TokenError;
use crate::errors::domain::DomainError;
use crate::{AppError, ErrorCode};

#[test]
fn maps_token_errors_to_401_codes() {
    let cases = [
        (TokenError::Malformed, ErrorCode::UnauthorizedMalformedJwt),
        (
            TokenError::UnknownKey("k".into()),
            ErrorCode::UnauthorizedUnknownKey,
        ),
        (
            TokenError::UnsupportedAlgorithm("HS256".into()),
            ErrorCode::UnauthorizedInvalidSignature,
        ),
        (TokenError::BadSignature, ErrorCode::UnauthorizedInvalidSignature),
        (TokenError::Expired, ErrorCode::UnauthorizedExpiredJwt),
        (TokenError::NotYetValid, ErrorCode::UnauthorizedJwtNotYetValid),
        (TokenError::InvalidAudience, ErrorCode::UnauthorizedInvalidJwt),
        (TokenError::InvalidIssuer, ErrorCode::UnauthorizedInvalidJwt),
        (
            TokenError::KeySourceUnavailable("timeout".into()),
            ErrorCode::UnauthorizedKeySourceUnavailable,
        ),
    ];

    for (token_error, code) in cases {
        let reason = token_error.to_string();
        let app: AppError = token_error.into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), 401);
        assert_eq!(app.detail(), format!("Invalid token: {reason}"));
    }
}

#[test]
fn key_source_detail_is_not_leaked() {
    let app: AppError =
        TokenError::KeySourceUnavailable("dns error: jwks.internal not found".into()).into();
    assert_eq!(app.detail(), "Invalid token: key source unavailable");
}

#[test]
fn maps_missing_bearer() {
    let app = AppError::unauthorized_missing_bearer();
    assert_eq!(app.code(), ErrorCode::UnauthorizedMissingBearer);
    assert_eq!(app.status().as_u16(), 401);
}

#[test]
fn maps_request_shape_errors() {
    let app = AppError::bad_request(ErrorCode::BadRequest, "Invalid JSON at line 1");
    assert_eq!(app.status().as_u16(), 400);

    let app = AppError::invalid("missing field `name`");
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_domain_errors_to_500() {
    let app: AppError = DomainError::infra("slow").into();
    assert_eq!(app.code(), ErrorCode::Internal);
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn maps_config_errors() {
    let app = AppError::config("SUPABASE_PROJECT_REF must be set");
    assert_eq!(app.code(), ErrorCode::ConfigError);
    assert_eq!(app.status().as_u16(), 500);
}
