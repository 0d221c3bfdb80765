use std::sync::Arc;
use std::time::Duration;

use backend_test_support::keys::{PRIMARY_KID, PRIMARY_PUBLIC_PEM};
use jsonwebtoken::{Algorithm, DecodingKey};
use stakkit_backend::auth::jwks::SigningKey;
use stakkit_backend::{build_state, AppState, JwksConfig, SecurityConfig, StaticKeySource};

/// State backed by a fixed key set holding only the primary fixture key.
/// The returned source exposes `lookups()`.
pub async fn static_state(security: SecurityConfig) -> (AppState, Arc<StaticKeySource>) {
    let key = DecodingKey::from_rsa_pem(PRIMARY_PUBLIC_PEM.as_bytes()).expect("fixture key");
    let source = Arc::new(StaticKeySource::new([SigningKey::new(
        PRIMARY_KID,
        Some(Algorithm::RS256),
        key,
    )]));

    let state = build_state()
        .with_security(security)
        .with_key_source(source.clone())
        .build()
        .await
        .unwrap_or_else(|e| panic!("build static state: {e}"));

    (state, source)
}

/// State backed by a real JWKS key source pointed at `url`.
pub async fn jwks_state(url: &str) -> AppState {
    build_state()
        .with_jwks(JwksConfig::new(url).with_fetch_timeout(Duration::from_secs(2)))
        .build()
        .await
        .unwrap_or_else(|e| panic!("build jwks state: {e}"))
}
