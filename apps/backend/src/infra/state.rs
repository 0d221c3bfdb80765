use std::sync::Arc;

use tracing::info;

use crate::auth::jwks::{JwksConfig, JwksKeySource, KeySource};
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for [`AppState`], used by `main` and by tests.
///
/// Exactly one key source is needed: either an explicit one
/// ([`with_key_source`](Self::with_key_source)) or a JWKS endpoint
/// ([`with_jwks`](Self::with_jwks)). An explicit source wins.
pub struct StateBuilder {
    security_config: SecurityConfig,
    key_source: Option<Arc<dyn KeySource>>,
    jwks: Option<JwksConfig>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            key_source: None,
            jwks: None,
        }
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_key_source(mut self, key_source: Arc<dyn KeySource>) -> Self {
        self.key_source = Some(key_source);
        self
    }

    pub fn with_jwks(mut self, config: JwksConfig) -> Self {
        self.jwks = Some(config);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let key_source: Arc<dyn KeySource> = match (self.key_source, self.jwks) {
            (Some(source), _) => source,
            (None, Some(config)) => {
                info!(url = %config.url, "Using JWKS key source");
                Arc::new(JwksKeySource::new(config)?)
            }
            (None, None) => {
                return Err(AppError::config("no signing key source configured"));
            }
        };

        Ok(AppState::new(key_source, self.security_config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::Algorithm;

    use super::*;
    use crate::auth::jwks::{SigningKey, StaticKeySource};

    #[tokio::test]
    async fn test_build_requires_key_source() {
        let err = build_state().build().await.err().unwrap();
        assert!(matches!(err, AppError::Config { .. }));
    }

    #[tokio::test]
    async fn test_build_with_static_source() {
        let state = build_state()
            .with_security(SecurityConfig::new(Algorithm::ES256))
            .with_key_source(Arc::new(StaticKeySource::new(Vec::<SigningKey>::new())))
            .build()
            .await
            .unwrap();

        assert_eq!(state.security().algorithm, Algorithm::ES256);
        assert_eq!(state.key_source.cached_key_count(), 0);
    }

    #[tokio::test]
    async fn test_build_with_jwks_starts_empty() {
        let state = build_state()
            .with_jwks(JwksConfig::for_supabase_project("abcd1234"))
            .build()
            .await
            .unwrap();

        assert_eq!(state.key_source.cached_key_count(), 0);
    }
}
