use jsonwebtoken::Algorithm;

/// Token verification policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    /// Signature algorithm every token must use. Never taken from the token.
    pub algorithm: Algorithm,
    /// Clock-skew tolerance in seconds for exp, nbf and iat.
    pub leeway_secs: u64,
    /// Expected `aud`. `None` disables the audience check.
    pub audience: Option<String>,
    /// Expected `iss`. `None` disables the issuer check.
    pub issuer: Option<String>,
}

impl SecurityConfig {
    pub const DEFAULT_LEEWAY_SECS: u64 = 30;

    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            leeway_secs: Self::DEFAULT_LEEWAY_SECS,
            audience: None,
            issuer: None,
        }
    }

    pub fn with_leeway_secs(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }

    pub fn with_audience(mut self, audience: Option<String>) -> Self {
        self.audience = audience;
        self
    }

    pub fn with_issuer(mut self, issuer: Option<String>) -> Self {
        self.issuer = issuer;
        self
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(Algorithm::RS256)
    }
}
