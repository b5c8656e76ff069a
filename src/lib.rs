//! `peaks2d` library crate.
//!
//! Evaluates a sum of anisotropic 2-D Gaussian peaks plus a constant background
//! on a sample grid, and scores it against observed data (residuals, negative
//! log-likelihood, reduced statistic) for an external optimizer.
//!
//! The binary (`peaks`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the model can be driven by any optimizer that can read/write `Parameter`s

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
