use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, get_current_timestamp, Validation};
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::claims::ClaimSet;
use crate::auth::jwks::{KeySource, KeySourceError};
use crate::state::security_config::SecurityConfig;

/// Why a token was rejected. `Display` is the short reason sent to callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed")]
    Malformed,
    /// Header names an algorithm other than the pinned one.
    #[error("unsupported algorithm")]
    UnsupportedAlgorithm(String),
    #[error("unknown key")]
    UnknownKey(String),
    #[error("bad signature")]
    BadSignature,
    #[error("expired")]
    Expired,
    #[error("not yet valid")]
    NotYetValid,
    #[error("invalid audience")]
    InvalidAudience,
    #[error("invalid issuer")]
    InvalidIssuer,
    /// Carries the key source failure for logs; callers only see the reason.
    #[error("key source unavailable")]
    KeySourceUnavailable(String),
}

impl TokenError {
    /// Short reason placed after `Invalid token: ` in responses.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed",
            TokenError::UnsupportedAlgorithm(_) => "unsupported algorithm",
            TokenError::UnknownKey(_) => "unknown key",
            TokenError::BadSignature => "bad signature",
            TokenError::Expired => "expired",
            TokenError::NotYetValid => "not yet valid",
            TokenError::InvalidAudience => "invalid audience",
            TokenError::InvalidIssuer => "invalid issuer",
            TokenError::KeySourceUnavailable(_) => "key source unavailable",
        }
    }
}

impl From<KeySourceError> for TokenError {
    fn from(e: KeySourceError) -> Self {
        match e {
            KeySourceError::KeyNotFound(kid) => TokenError::UnknownKey(kid),
            KeySourceError::Unavailable(reason) => TokenError::KeySourceUnavailable(reason),
        }
    }
}

/// Verifies provider-issued bearer tokens against the key source.
#[derive(Clone)]
pub struct TokenVerifier {
    key_source: Arc<dyn KeySource>,
    security: SecurityConfig,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(key_source: Arc<dyn KeySource>, security: SecurityConfig) -> Self {
        let validation = build_validation(&security);
        Self {
            key_source,
            security,
            validation,
        }
    }

    pub fn security(&self) -> &SecurityConfig {
        &self.security
    }

    /// Verify `token` and return its claims.
    ///
    /// Structural checks (segment count, header, algorithm, kid) run before
    /// any key lookup, so a malformed token never triggers a JWKS fetch.
    pub async fn verify(&self, token: &str) -> Result<ClaimSet, TokenError> {
        let result = self.verify_inner(token).await;

        match &result {
            Ok(claims) => debug!(sub = ?claims.sub(), "Token verified"),
            Err(TokenError::KeySourceUnavailable(detail)) => {
                warn!(reason = "key source unavailable", detail = %detail, "Token rejected")
            }
            Err(e) => warn!(reason = e.reason(), "Token rejected"),
        }

        result
    }

    async fn verify_inner(&self, token: &str) -> Result<ClaimSet, TokenError> {
        if token.split('.').count() != 3 {
            return Err(TokenError::Malformed);
        }

        let header = decode_header(token).map_err(|_| TokenError::Malformed)?;

        debug!(kid = ?header.kid, alg = ?header.alg, "Verifying token");

        if header.alg != self.security.algorithm {
            return Err(TokenError::UnsupportedAlgorithm(format!("{:?}", header.alg)));
        }

        let kid = match header.kid.as_deref() {
            Some(kid) if !kid.is_empty() => kid,
            _ => return Err(TokenError::UnknownKey(String::new())),
        };

        let signing_key = self.key_source.get_signing_key(kid).await?;

        // A key published for another algorithm is not a key for this token.
        if let Some(declared) = signing_key.algorithm {
            if declared != self.security.algorithm {
                return Err(TokenError::UnknownKey(kid.to_string()));
            }
        }

        let data = decode::<ClaimSet>(token, &signing_key.key, &self.validation)
            .map_err(|e| map_jwt_error(e.kind()))?;

        let claims = data.claims;

        // jsonwebtoken does not look at iat.
        if let Some(iat) = claims.iat() {
            let latest = get_current_timestamp().saturating_add(self.security.leeway_secs);
            if iat > 0 && iat as u64 > latest {
                return Err(TokenError::NotYetValid);
            }
        }

        Ok(claims)
    }
}

/// Validation with the algorithm pinned from configuration. exp and nbf are
/// checked when present but not required. A configured audience or issuer
/// makes the matching claim mandatory.
fn build_validation(security: &SecurityConfig) -> Validation {
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = security.leeway_secs;
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.required_spec_claims.clear();

    match &security.audience {
        Some(audience) => {
            validation.set_audience(&[audience]);
            validation.required_spec_claims.insert("aud".to_string());
        }
        None => validation.validate_aud = false,
    }

    if let Some(issuer) = &security.issuer {
        validation.set_issuer(&[issuer]);
        validation.required_spec_claims.insert("iss".to_string());
    }

    validation
}

fn map_jwt_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::ImmatureSignature => TokenError::NotYetValid,
        ErrorKind::InvalidAudience => TokenError::InvalidAudience,
        ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
        ErrorKind::MissingRequiredClaim(claim) => match claim.as_str() {
            "aud" => TokenError::InvalidAudience,
            "iss" => TokenError::InvalidIssuer,
            _ => TokenError::Malformed,
        },
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidKeyFormat
        | ErrorKind::InvalidRsaKey(_) => TokenError::BadSignature,
        _ => TokenError::Malformed,
    }
}
