#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;

#[cfg(test)]
pub mod test_bootstrap;

pub use auth::claims::{ClaimSet, ClaimValue};
pub use auth::jwks::{JwksConfig, JwksKeySource, KeySource, KeySourceError, StaticKeySource};
pub use auth::jwt::{TokenError, TokenVerifier};
pub use config::{AuthSettings, ServerSettings};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::{AuthToken, ValidatedJson, VerifiedClaims};
pub use infra::state::build_state;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::security_headers::SecurityHeaders;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
