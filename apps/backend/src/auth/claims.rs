//! Claim sets produced by token verification.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single claim value. Covers everything a JSON claim can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Null,
    Bool(bool),
    Integer(i64),
    /// Whole numbers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    String(String),
    Array(Vec<ClaimValue>),
    Object(BTreeMap<String, ClaimValue>),
}

impl ClaimValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric claims as whole seconds; floats are truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ClaimValue::Integer(n) => Some(*n),
            ClaimValue::Unsigned(n) => i64::try_from(*n).ok(),
            ClaimValue::Float(f) if f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }
}

/// Claims of a verified token, keyed by claim name.
///
/// Serializes as a plain JSON object so handlers can return it as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(BTreeMap<String, ClaimValue>);

impl ClaimSet {
    pub fn get(&self, name: &str) -> Option<&ClaimValue> {
        self.0.get(name)
    }

    /// Subject (user identifier)
    pub fn sub(&self) -> Option<&str> {
        self.get("sub").and_then(ClaimValue::as_str)
    }

    /// Expiry (seconds since epoch)
    pub fn exp(&self) -> Option<i64> {
        self.get("exp").and_then(ClaimValue::as_i64)
    }

    /// Issued-at (seconds since epoch)
    pub fn iat(&self) -> Option<i64> {
        self.get("iat").and_then(ClaimValue::as_i64)
    }

    /// Not-before (seconds since epoch)
    pub fn nbf(&self) -> Option<i64> {
        self.get("nbf").and_then(ClaimValue::as_i64)
    }

    pub fn email(&self) -> Option<&str> {
        self.get("email").and_then(ClaimValue::as_str)
    }

    /// Provider role claim, e.g. `"authenticated"`.
    pub fn role(&self) -> Option<&str> {
        self.get("role").and_then(ClaimValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ClaimValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, ClaimValue)> for ClaimSet {
    fn from_iter<I: IntoIterator<Item = (String, ClaimValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
