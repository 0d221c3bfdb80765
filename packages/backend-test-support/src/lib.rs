//! Backend test support utilities
//!
//! Shared helpers for the backend's unit and integration tests: logging
//! bootstrap, Problem Details assertions, and RSA key fixtures for minting
//! signed tokens. Nothing here depends on the backend crate itself.

pub mod keys;
pub mod logging;
pub mod problem_details;
