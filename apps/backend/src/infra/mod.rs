//! Infrastructure wiring: turning configuration into application state.

pub mod state;
