use std::sync::Arc;

use crate::auth::jwks::KeySource;
use crate::auth::jwt::TokenVerifier;
use super::security_config::SecurityConfig;

/// Application state shared by all workers
#[derive(Clone)]
pub struct AppState {
    /// Token verifier used by the auth routes
    pub verifier: TokenVerifier,
    /// Key source behind the verifier (process-wide key cache)
    pub key_source: Arc<dyn KeySource>,
}

impl AppState {
    pub fn new(key_source: Arc<dyn KeySource>, security: SecurityConfig) -> Self {
        Self {
            verifier: TokenVerifier::new(key_source.clone(), security),
            key_source,
        }
    }

    pub fn security(&self) -> &SecurityConfig {
        self.verifier.security()
    }
}
