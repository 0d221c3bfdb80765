use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;

/// Raw bearer token from the `Authorization` header. Not yet verified.
///
/// A missing header, a non-Bearer scheme or an empty token fail extraction
/// with `UNAUTHORIZED_MISSING_BEARER`, before any handler code runs.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub token: String,
}

impl AuthToken {
    /// Parse an `Authorization` header value. The scheme is matched
    /// case-insensitively; exactly one token must follow it.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split_whitespace();
        let scheme = parts.next()?;
        let token = parts.next()?;

        if !scheme.eq_ignore_ascii_case("Bearer") || parts.next().is_some() {
            return None;
        }

        Some(AuthToken {
            token: token.to_string(),
        })
    }

    pub fn from_http_request(req: &HttpRequest) -> Result<Self, AppError> {
        req.headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(AuthToken::parse)
            .ok_or_else(AppError::unauthorized_missing_bearer)
    }
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::from_http_request(req))
    }
}
