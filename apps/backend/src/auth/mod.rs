//! Verification of identity-provider bearer tokens.

pub mod claims;
pub mod jwks;
pub mod jwt;

pub use claims::{ClaimSet, ClaimValue};
pub use jwks::{JwksKeySource, KeySource, KeySourceError, SigningKey, StaticKeySource};
pub use jwt::{TokenError, TokenVerifier};
