use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use super::{optional_var, parse_var};
use crate::auth::jwks::JwksConfig;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Token verification settings.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub security: SecurityConfig,
    pub jwks: JwksConfig,
}

impl AuthSettings {
    /// Reads `SUPABASE_PROJECT_REF`, `JWKS_URL`, `JWKS_FETCH_TIMEOUT_SECS`,
    /// `JWKS_CACHE_TTL_SECS`, `JWT_ALGORITHM`, `JWT_LEEWAY_SECS`,
    /// `JWT_AUDIENCE` and `JWT_ISSUER`.
    pub fn from_env() -> Result<Self, AppError> {
        let mut jwks = match (optional_var("JWKS_URL"), optional_var("SUPABASE_PROJECT_REF")) {
            (Some(url), _) => JwksConfig::new(url),
            (None, Some(project_ref)) => JwksConfig::for_supabase_project(&project_ref),
            (None, None) => {
                return Err(AppError::config(
                    "SUPABASE_PROJECT_REF must be set (or JWKS_URL to override the key endpoint)",
                ))
            }
        };

        if let Some(secs) = parse_var::<u64>("JWKS_FETCH_TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(AppError::config("JWKS_FETCH_TIMEOUT_SECS must be at least 1"));
            }
            jwks = jwks.with_fetch_timeout(Duration::from_secs(secs));
        }

        let ttl = parse_var::<u64>("JWKS_CACHE_TTL_SECS")?.map(Duration::from_secs);
        jwks = jwks.with_cache_ttl(ttl);

        let algorithm = match optional_var("JWT_ALGORITHM") {
            Some(name) => parse_algorithm(&name)?,
            None => Algorithm::RS256,
        };

        let mut security = SecurityConfig::new(algorithm)
            .with_audience(optional_var("JWT_AUDIENCE"))
            .with_issuer(optional_var("JWT_ISSUER"));

        if let Some(leeway) = parse_var::<u64>("JWT_LEEWAY_SECS")? {
            security = security.with_leeway_secs(leeway);
        }

        Ok(Self { security, jwks })
    }
}

/// Accepts asymmetric signature algorithms only. A shared-secret algorithm
/// would let anyone holding the published key mint tokens.
pub fn parse_algorithm(name: &str) -> Result<Algorithm, AppError> {
    let algorithm = Algorithm::from_str(name.trim())
        .map_err(|_| AppError::config(format!("JWT_ALGORITHM '{name}' is not a known algorithm")))?;

    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Err(AppError::config(format!(
            "JWT_ALGORITHM '{name}' is symmetric; an asymmetric algorithm is required"
        ))),
        _ => Ok(algorithm),
    }
}
