//! UI components.

pub mod rope_wiring;
