//! Data sources: synthetic observations for a configured model.

pub mod sample;

pub use sample::*;
