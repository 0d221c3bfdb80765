//! Identity-provider signing keys, fetched from a JWKS endpoint and cached
//! by key id.
//!
//! Cache policy: the cache starts empty and is populated by the first lookup.
//! A lookup for a kid that is not cached refetches the whole key set, which
//! also picks up keys the provider added during a rotation. Keys the provider
//! removed stay usable until the next refetch. With a TTL configured, a
//! lookup after the TTL refetches even when the kid is cached.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::{AlgorithmParameters, Jwk, PublicKeyUse};
use jsonwebtoken::{Algorithm, DecodingKey};
use parking_lot::RwLock;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::AppError;

/// A provider public key usable for signature verification.
#[derive(Clone)]
pub struct SigningKey {
    pub kid: String,
    /// Algorithm the provider declared for this key, if any.
    pub algorithm: Option<Algorithm>,
    pub key: DecodingKey,
}

impl SigningKey {
    pub fn new(kid: impl Into<String>, algorithm: Option<Algorithm>, key: DecodingKey) -> Self {
        Self {
            kid: kid.into(),
            algorithm,
            key,
        }
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("kid", &self.kid)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeySourceError {
    #[error("no signing key with kid '{0}'")]
    KeyNotFound(String),
    #[error("key source unavailable: {0}")]
    Unavailable(String),
}

/// Resolves signing keys by key id.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn get_signing_key(&self, kid: &str) -> Result<SigningKey, KeySourceError>;

    /// Number of keys currently held without a fetch.
    fn cached_key_count(&self) -> usize;
}

/// JWKS endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwksConfig {
    pub url: String,
    pub fetch_timeout: Duration,
    /// `None` keeps keys until an unknown kid forces a refetch.
    pub cache_ttl: Option<Duration>,
}

impl JwksConfig {
    pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fetch_timeout: Self::DEFAULT_FETCH_TIMEOUT,
            cache_ttl: None,
        }
    }

    /// Supabase publishes each project's keys under its auth API.
    pub fn for_supabase_project(project_ref: &str) -> Self {
        Self::new(format!(
            "https://{project_ref}.supabase.co/auth/v1/.well-known/jwks.json"
        ))
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

/// Immutable view of the cache; replaced wholesale on refresh.
#[derive(Default)]
struct KeySnapshot {
    keys: HashMap<String, SigningKey>,
    fetched_at: Option<Instant>,
    generation: u64,
}

/// Key set document as served by the JWKS endpoint. Keys are kept raw so
/// one unparseable entry does not reject the others.
#[derive(Debug, Deserialize)]
struct JwksDocument {
    keys: Vec<serde_json::Value>,
}

/// `KeySource` backed by the provider's JWKS endpoint.
pub struct JwksKeySource {
    config: JwksConfig,
    http_client: reqwest::Client,
    snapshot: RwLock<Arc<KeySnapshot>>,
    /// Serializes fetches so concurrent misses share one round trip.
    refresh_lock: Mutex<()>,
}

impl JwksKeySource {
    pub fn new(config: JwksConfig) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .connect_timeout(config.fetch_timeout)
            .user_agent(concat!("stakkit-backend/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::config(format!("Failed to create JWKS HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
            snapshot: RwLock::new(Arc::new(KeySnapshot::default())),
            refresh_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &JwksConfig {
        &self.config
    }

    fn current(&self) -> Arc<KeySnapshot> {
        self.snapshot.read().clone()
    }

    fn is_stale(&self, snapshot: &KeySnapshot) -> bool {
        match (self.config.cache_ttl, snapshot.fetched_at) {
            (Some(ttl), Some(fetched_at)) => fetched_at.elapsed() >= ttl,
            _ => false,
        }
    }

    /// Refetch unless another task already replaced the snapshot seen by
    /// the caller while it waited for the lock.
    async fn refresh_after(&self, seen_generation: u64) -> Result<Arc<KeySnapshot>, KeySourceError> {
        let _guard = self.refresh_lock.lock().await;

        let current = self.current();
        if current.generation != seen_generation {
            return Ok(current);
        }

        let keys = self.fetch().await?;
        let next = Arc::new(KeySnapshot {
            keys,
            fetched_at: Some(Instant::now()),
            generation: seen_generation + 1,
        });
        *self.snapshot.write() = next.clone();

        info!(
            url = %self.config.url,
            key_count = next.keys.len(),
            "JWKS cache refreshed"
        );

        Ok(next)
    }

    async fn fetch(&self) -> Result<HashMap<String, SigningKey>, KeySourceError> {
        debug!(url = %self.config.url, "Fetching JWKS");

        let response = self
            .http_client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %self.config.url, error = %e, "JWKS request failed");
                KeySourceError::Unavailable(format!("failed to fetch JWKS: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.config.url, status = %status, "JWKS endpoint returned an error status");
            return Err(KeySourceError::Unavailable(format!(
                "JWKS endpoint returned status {status}"
            )));
        }

        let document: JwksDocument = response.json().await.map_err(|e| {
            warn!(url = %self.config.url, error = %e, "JWKS response is not a key set");
            KeySourceError::Unavailable(format!("failed to parse JWKS: {e}"))
        })?;

        Ok(index_keys(document))
    }
}

#[async_trait]
impl KeySource for JwksKeySource {
    async fn get_signing_key(&self, kid: &str) -> Result<SigningKey, KeySourceError> {
        let snapshot = self.current();
        if !self.is_stale(&snapshot) {
            if let Some(key) = snapshot.keys.get(kid) {
                return Ok(key.clone());
            }
            debug!(kid = %kid, "Key not found in cache, refreshing JWKS");
        } else {
            debug!(kid = %kid, "JWKS cache is past its TTL, refreshing");
        }

        let refreshed = self.refresh_after(snapshot.generation).await?;
        refreshed
            .keys
            .get(kid)
            .cloned()
            .ok_or_else(|| KeySourceError::KeyNotFound(kid.to_string()))
    }

    fn cached_key_count(&self) -> usize {
        self.current().keys.len()
    }
}

/// Index the usable signature keys of a JWKS document by kid.
fn index_keys(document: JwksDocument) -> HashMap<String, SigningKey> {
    let mut keys = HashMap::new();

    for raw in document.keys {
        let jwk: Jwk = match serde_json::from_value(raw) {
            Ok(jwk) => jwk,
            Err(e) => {
                warn!(error = %e, "Failed to parse JWK, skipping");
                continue;
            }
        };

        match signing_key_from_jwk(&jwk) {
            Ok(key) => {
                debug!(kid = %key.kid, alg = ?key.algorithm, "Loaded JWK");
                keys.insert(key.kid.clone(), key);
            }
            Err(reason) => {
                warn!(kid = ?jwk.common.key_id, reason = %reason, "Skipping JWK");
            }
        }
    }

    if keys.is_empty() {
        warn!("JWKS contained no usable signing keys");
    }

    keys
}

fn signing_key_from_jwk(jwk: &Jwk) -> Result<SigningKey, String> {
    if matches!(jwk.common.public_key_use, Some(PublicKeyUse::Encryption)) {
        return Err("encryption key".to_string());
    }

    if matches!(jwk.algorithm, AlgorithmParameters::OctetKey(_)) {
        return Err("symmetric key".to_string());
    }

    let kid = jwk
        .common
        .key_id
        .clone()
        .ok_or_else(|| "missing kid".to_string())?;

    let algorithm = match &jwk.common.key_algorithm {
        Some(declared) => {
            let name = format!("{declared:?}");
            Some(
                Algorithm::from_str(&name)
                    .map_err(|_| format!("not a signature algorithm: {name}"))?,
            )
        }
        None => None,
    };

    let key = DecodingKey::from_jwk(jwk).map_err(|e| format!("unusable key material: {e}"))?;

    Ok(SigningKey::new(kid, algorithm, key))
}

/// Fixed, in-memory key set.
///
/// Useful where the keys are known up front, and in tests, where
/// `lookups()` shows whether verification consulted the keys at all.
#[derive(Debug, Default)]
pub struct StaticKeySource {
    keys: HashMap<String, SigningKey>,
    lookups: AtomicUsize,
}

impl StaticKeySource {
    pub fn new(keys: impl IntoIterator<Item = SigningKey>) -> Self {
        Self {
            keys: keys.into_iter().map(|k| (k.kid.clone(), k)).collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Number of `get_signing_key` calls so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn get_signing_key(&self, kid: &str) -> Result<SigningKey, KeySourceError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.keys
            .get(kid)
            .cloned()
            .ok_or_else(|| KeySourceError::KeyNotFound(kid.to_string()))
    }

    fn cached_key_count(&self) -> usize {
        self.keys.len()
    }
}
