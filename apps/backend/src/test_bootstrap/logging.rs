//! Logging bootstrap for unit tests inside this crate.
//!
//! Integration tests call `backend_test_support::logging::init` directly;
//! this wrapper exists so the `ctor` hook in `lib.rs` has a crate-local path.

pub fn init() {
    backend_test_support::logging::init();
}
