#![allow(dead_code)]

pub mod app_builder;
pub mod jwks_server;
pub mod test_state;

pub use app_builder::create_test_app;
pub use jwks_server::JwksServer;
pub use test_state::{jwks_state, static_state};
