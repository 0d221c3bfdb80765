//! Domain-level error type used by services.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! through the `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DomainError {
    /// A downstream dependency failed while handling the event
    Infra(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Infra(d) => write!(f, "infra error: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn infra(detail: impl Into<String>) -> Self {
        Self::Infra(detail.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let err = DomainError::infra("notifier timed out");
        assert_eq!(err.to_string(), "infra error: notifier timed out");
    }
}
