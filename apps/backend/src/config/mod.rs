//! Settings read from the process environment at startup.

use std::env;
use std::str::FromStr;

use crate::error::AppError;

pub mod auth;
pub mod server;

pub use auth::AuthSettings;
pub use server::ServerSettings;

/// Value of `name`, treating unset and blank alike.
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse `name` if set, otherwise `None`.
fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    optional_var(name)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| {
                AppError::config(format!("{name} has an invalid value: '{raw}'"))
            })
        })
        .transpose()
}
