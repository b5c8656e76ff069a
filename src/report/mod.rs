//! Reporting utilities: run summaries and profile tables.

pub mod format;

pub use format::*;
