//! Error codes for the Stakkit backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear
//! in HTTP responses.

use core::fmt;

/// Centralized error codes for the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Token is not a well-formed JWT
    UnauthorizedMalformedJwt,
    /// Token names a key the identity provider does not publish
    UnauthorizedUnknownKey,
    /// Signature does not verify, or algorithm is not the pinned one
    UnauthorizedInvalidSignature,
    /// Token has expired
    UnauthorizedExpiredJwt,
    /// Token is not valid yet (nbf / iat in the future)
    UnauthorizedJwtNotYetValid,
    /// Token claims fail audience or issuer policy
    UnauthorizedInvalidJwt,
    /// Signing keys could not be fetched
    UnauthorizedKeySourceUnavailable,

    // Request Validation
    /// Body is not parseable JSON
    BadRequest,
    /// Body is JSON but does not match the expected shape
    ValidationError,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedMalformedJwt => "UNAUTHORIZED_MALFORMED_JWT",
            Self::UnauthorizedUnknownKey => "UNAUTHORIZED_UNKNOWN_KEY",
            Self::UnauthorizedInvalidSignature => "UNAUTHORIZED_INVALID_SIGNATURE",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::UnauthorizedJwtNotYetValid => "UNAUTHORIZED_JWT_NOT_YET_VALID",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedKeySourceUnavailable => "UNAUTHORIZED_KEY_SOURCE_UNAVAILABLE",

            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
