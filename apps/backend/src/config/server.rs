use super::{optional_var, parse_var};
use crate::error::AppError;

/// Bind address for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub const DEFAULT_HOST: &'static str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8000;

    /// Reads `BACKEND_HOST` and `BACKEND_PORT`.
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            host: optional_var("BACKEND_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            port: parse_var::<u16>("BACKEND_PORT")?.unwrap_or(Self::DEFAULT_PORT),
        })
    }
}
