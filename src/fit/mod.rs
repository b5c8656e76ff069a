//! Objective diagnostics for external fitting.
//!
//! Optimization itself lives outside this crate; this module only probes the
//! objective the optimizer would see.

pub mod profile;

pub use profile::*;
